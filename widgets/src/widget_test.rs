use std::sync::Mutex;

use chat_session::{
    ChatRequest, ChatTransport, ConversationStore, IdentityStore, Message, TransportError,
};
use tokio::sync::Notify;

use super::*;

/// Replies with the prompt it was sent, optionally waiting on a gate first.
#[derive(Default)]
struct EchoTransport {
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

#[async_trait::async_trait]
impl ChatTransport for EchoTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let prompt = request.data.message.content().to_owned();
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(format!("**echo** {prompt}"))
    }
}

fn widget_with(variant: Variant, transport: Arc<EchoTransport>) -> ChatWidget {
    let controller =
        RequestController::new(IdentityStore::in_memory(), Arc::new(ConversationStore::new()), transport).unwrap();
    let config = WidgetConfig {
        title: "Help".to_owned(),
        suggestions: vec!["Pricing?".to_owned(), "Opening hours".to_owned()],
        ..WidgetConfig::default()
    };
    ChatWidget::new(variant, config, Arc::new(controller))
}

#[tokio::test]
async fn submit_delegates_to_controller() {
    let transport = Arc::new(EchoTransport::default());
    let widget = widget_with(Variant::FullPage, transport.clone());

    let outcome = widget.submit("  hello ").await;

    assert_eq!(outcome, SubmitOutcome::Answered(Message::agent("**echo** hello")));
    assert_eq!(*transport.prompts.lock().unwrap(), vec!["hello".to_owned()]);
    assert!(widget.render(0).contains("Agent:\n  echo hello"));
}

#[tokio::test]
async fn pick_suggestion_submits_the_prompt() {
    let transport = Arc::new(EchoTransport::default());
    let widget = widget_with(Variant::SuggestionCard, transport.clone());

    let outcome = widget.pick_suggestion(1).await;

    assert_eq!(outcome, Some(SubmitOutcome::Answered(Message::agent("**echo** Opening hours"))));
    assert_eq!(*transport.prompts.lock().unwrap(), vec!["Opening hours".to_owned()]);
}

#[tokio::test]
async fn pick_suggestion_out_of_range_is_none() {
    let transport = Arc::new(EchoTransport::default());
    let widget = widget_with(Variant::FullPage, transport.clone());

    assert_eq!(widget.pick_suggestion(7).await, None);
    assert!(transport.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn compact_variant_offers_no_suggestions() {
    let transport = Arc::new(EchoTransport::default());
    let widget = widget_with(Variant::Compact, transport.clone());

    assert!(!widget.offers_suggestions());
    assert_eq!(widget.pick_suggestion(0).await, None);
    assert!(transport.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn input_is_disabled_while_request_in_flight() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(EchoTransport { gate: Some(gate.clone()), ..EchoTransport::default() });
    let widget = widget_with(Variant::Compact, transport);
    assert!(widget.can_submit());

    let mut state = widget.controller().subscribe();
    let pending = widget.controller().spawn_submit("hello");
    state.wait_for(|s| s.loading).await.unwrap();

    assert!(!widget.can_submit());
    assert!(widget.render(0).ends_with(transcript::THINKING));
    assert_eq!(widget.submit("again").await, SubmitOutcome::Busy);

    gate.notify_one();
    pending.await.unwrap();
    assert!(widget.can_submit());
}

#[tokio::test]
async fn last_reply_html_renders_newest_agent_message() {
    let widget = widget_with(Variant::FullPage, Arc::new(EchoTransport::default()));
    assert_eq!(widget.last_reply_html(), None);

    widget.submit("one").await;
    widget.submit("two").await;

    let html = widget.last_reply_html().unwrap();
    assert!(html.contains("<strong>echo</strong> two"), "{html}");
}

#[test]
fn exposes_configuration() {
    let widget = widget_with(Variant::SuggestionCard, Arc::new(EchoTransport::default()));
    assert_eq!(widget.variant(), Variant::SuggestionCard);
    assert_eq!(widget.placeholder(), crate::config::DEFAULT_PLACEHOLDER);
    assert_eq!(widget.rotator().len(), 2);
    assert_eq!(widget.layout(), &Variant::SuggestionCard.layout());
    assert_eq!(widget.config().title, "Help");
}
