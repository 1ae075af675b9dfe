use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chat_session::{
    FileStore, IdentityStore, KeyValueStore, MemoryStore, RequestController, RequestTimeouts, SessionConfig,
    SessionError, StorageError, SubmitOutcome,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use widgets::transcript::{self, THINKING};
use widgets::{ChatWidget, Layout, SuggestionMode, Variant, WidgetConfig, WidgetConfigError, markdown};


const STATE_DIR_NAME: &str = "chat-widgets";
const IDENTITY_FILE: &str = "identity.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    WidgetConfig(#[from] WidgetConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no data directory on this platform; pass --state-dir or set CHAT_STATE_DIR")]
    NoStateDir,
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("message is empty")]
    EmptyMessage,
    #[error("a request is already in flight")]
    Busy,
    #[error("{0}")]
    Failed(String),
}

#[derive(Parser, Debug)]
#[command(name = "chat-cli", about = "Terminal chat widget for the agent proxy")]
struct Cli {
    /// Proxy URL. Overrides the config file, which overrides `CHAT_ENDPOINT`.
    #[arg(long)]
    endpoint: Option<String>,

    /// YAML widget configuration.
    #[arg(long, env = "CHAT_WIDGET_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the durable user identifier.
    #[arg(long, env = "CHAT_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Widget variant: full, compact or card.
    #[arg(long, default_value = "full")]
    variant: Variant,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Interactive chat (default).
    Chat,
    /// Send one message and print the reply.
    Send { message: String },
    /// Print the user and session identifiers.
    Ids {
        /// Forget stored identifiers and generate new ones.
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let widget_config = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };
    let identity = identity_store(cli.state_dir.clone())?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Ids { reset } => run_ids(&identity, reset),
        command => {
            let session = session_config(cli.endpoint.as_deref(), &widget_config)?;
            info!(endpoint = %session.endpoint, variant = %cli.variant, "cli: starting");
            let controller = RequestController::from_config(&session, identity)?;
            let widget = ChatWidget::new(cli.variant, widget_config, Arc::new(controller));
            match command {
                Command::Send { message } => run_send(&widget, &message).await,
                _ => run_chat(&widget).await,
            }
        }
    }
}

// =============================================================================
// WIRING
// =============================================================================

fn session_config(endpoint: Option<&str>, widget: &WidgetConfig) -> Result<SessionConfig, SessionError> {
    match endpoint {
        Some(endpoint) => Ok(SessionConfig::new(endpoint)?.with_timeouts(RequestTimeouts::from_env())),
        None => widget.session_config(),
    }
}

fn state_dir(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    explicit
        .or_else(|| dirs::data_dir().map(|dir| dir.join(STATE_DIR_NAME)))
        .ok_or(CliError::NoStateDir)
}

/// Durable scope on disk; the session scope lives as long as the process.
fn identity_store(explicit_dir: Option<PathBuf>) -> Result<IdentityStore, CliError> {
    let path = state_dir(explicit_dir)?.join(IDENTITY_FILE);
    debug!(path = %path.display(), "cli: identity file");
    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(path));
    let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    Ok(IdentityStore::new(Some(session), Some(durable)))
}

// =============================================================================
// COMMANDS
// =============================================================================

fn run_ids(identity: &IdentityStore, reset: bool) -> Result<(), CliError> {
    if reset {
        identity.forget_user()?;
        identity.forget_session()?;
    }
    println!("user_id    {}", identity.user_id()?);
    println!("session_id {}", identity.session_id()?);
    Ok(())
}

async fn run_send(widget: &ChatWidget, message: &str) -> Result<(), CliError> {
    match widget.submit(message).await {
        SubmitOutcome::Answered(reply) => {
            println!("{}", markdown::render_plain(reply.content()));
            Ok(())
        }
        SubmitOutcome::Failed(error) => Err(CliError::Failed(error)),
        SubmitOutcome::Ignored => Err(CliError::EmptyMessage),
        SubmitOutcome::Busy => Err(CliError::Busy),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    /// One-based suggestion number.
    Suggestion(usize),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    if trimmed == "/quit" {
        return Input::Quit;
    }
    if let Some(n) = trimmed.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
        if n > 0 {
            return Input::Suggestion(n);
        }
    }
    Input::Message(trimmed)
}

async fn run_chat(widget: &ChatWidget) -> Result<(), CliError> {
    let rotating = widget.layout().suggestions == SuggestionMode::Rotating;
    let mut ticker = widget.rotator().ticker();
    let mut printed = 0;

    println!("{}", widget.render(0));
    println!("({}  /quit to exit)", widget.placeholder());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Blank => continue,
                    Input::Quit => break,
                    Input::Suggestion(n) => {
                        if !widget.offers_suggestions() || widget.rotator().get(n - 1).is_none() {
                            eprintln!("no suggestion /{n}");
                            continue;
                        }
                        println!("{THINKING}");
                        widget.pick_suggestion(n - 1).await;
                    }
                    Input::Message(text) => {
                        println!("{THINKING}");
                        widget.submit(text).await;
                    }
                }
                print_update(widget, &mut printed);
            }
            index = ticker.tick(), if rotating => {
                if let Some(suggestion) = widget.rotator().get(index) {
                    println!("Try /{}: {suggestion}", index + 1);
                }
            }
        }
    }
    Ok(())
}

/// Print messages appended since the last update, plus any error line.
fn print_update(widget: &ChatWidget, printed: &mut usize) {
    let conversation = widget.controller().conversation();
    let messages = conversation.since(*printed);
    *printed += messages.len();

    let layout = Layout {
        show_header: false,
        show_description: false,
        suggestions: SuggestionMode::Hidden,
        ..*widget.layout()
    };
    let frame = transcript::render(&messages, &widget.controller().state(), &layout, widget.config(), 0);
    if !frame.is_empty() {
        println!("{frame}\n");
    }
}
