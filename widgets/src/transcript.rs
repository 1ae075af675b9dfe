//! Terminal transcript rendering.
//!
//! Rendering is a pure function of a controller snapshot plus static
//! configuration; callers redraw whenever the controller's revision or
//! loading flag changes.

#[cfg(test)]
#[path = "transcript_test.rs"]
mod transcript_test;

use chat_session::{ControllerState, Message, Role};

use crate::config::WidgetConfig;
use crate::markdown::render_plain;
use crate::variant::{BubbleStyle, Layout, SuggestionMode};

pub const THINKING: &str = "Thinking...";
const MIN_WRAP_WIDTH: usize = 8;

/// Render the full widget view for one frame.
///
/// `rotation` is the index of the suggestion shown by rotating layouts; it
/// wraps around the suggestion list.
#[must_use]
pub fn render(
    messages: &[Message],
    state: &ControllerState,
    layout: &Layout,
    config: &WidgetConfig,
    rotation: usize,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if layout.show_header {
        header(&mut lines, &config.title, layout);
        lines.push(String::new());
    }

    if messages.is_empty() && layout.show_description && !config.description.is_empty() {
        lines.extend(wrap(&config.description, layout.width));
        lines.push(String::new());
    }

    suggestions(&mut lines, messages.is_empty(), layout, config, rotation);

    for message in messages {
        bubble(&mut lines, message, layout);
        lines.push(String::new());
    }

    if state.loading {
        lines.push(THINKING.to_owned());
    } else if let Some(error) = &state.last_error {
        lines.extend(wrap(&format!("! {error}"), layout.width));
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

fn header(lines: &mut Vec<String>, title: &str, layout: &Layout) {
    match layout.bubble {
        BubbleStyle::Labelled => {
            lines.push(title.to_owned());
            lines.push("=".repeat(title.chars().count().clamp(1, layout.width)));
        }
        BubbleStyle::Prefixed => lines.push(format!("[ {title} ]")),
        BubbleStyle::Boxed => {
            let inner = layout.width.saturating_sub(4);
            let rule = format!("+{}+", "-".repeat(inner + 2));
            lines.push(rule.clone());
            for line in wrap(title, inner) {
                lines.push(format!("| {line:<inner$} |"));
            }
            lines.push(rule);
        }
    }
}

fn suggestions(lines: &mut Vec<String>, empty: bool, layout: &Layout, config: &WidgetConfig, rotation: usize) {
    if config.suggestions.is_empty() {
        return;
    }
    match layout.suggestions {
        SuggestionMode::Hidden => {}
        SuggestionMode::List => {
            if empty {
                lines.push("Try asking:".to_owned());
                for (n, suggestion) in config.suggestions.iter().enumerate() {
                    lines.push(format!("  /{} {suggestion}", n + 1));
                }
                lines.push(String::new());
            }
        }
        SuggestionMode::Rotating => {
            let index = rotation % config.suggestions.len();
            lines.extend(wrap(&format!("Try /{}: {}", index + 1, config.suggestions[index]), layout.width));
            lines.push(String::new());
        }
    }
}

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Agent => "Agent",
    }
}

fn bubble(lines: &mut Vec<String>, message: &Message, layout: &Layout) {
    let body = match message.role() {
        Role::Agent => render_plain(message.content()),
        Role::User => message.content().to_owned(),
    };

    match layout.bubble {
        BubbleStyle::Labelled => {
            lines.push(format!("{}:", label(message.role())));
            for line in wrap(&body, layout.width.saturating_sub(2)) {
                lines.push(indent("  ", &line));
            }
        }
        BubbleStyle::Prefixed => {
            let marker = match message.role() {
                Role::User => "> ",
                Role::Agent => "< ",
            };
            for (i, line) in wrap(&body, layout.width.saturating_sub(2)).iter().enumerate() {
                lines.push(indent(if i == 0 { marker } else { "  " }, line));
            }
        }
        BubbleStyle::Boxed => {
            lines.push(format!("+- {}", label(message.role())));
            for line in wrap(&body, layout.width.saturating_sub(2)) {
                lines.push(indent("| ", &line));
            }
            lines.push("+-".to_owned());
        }
    }
}

fn indent(prefix: &str, line: &str) -> String {
    if line.is_empty() { prefix.trim_end().to_owned() } else { format!("{prefix}{line}") }
}

// =============================================================================
// WRAPPING
// =============================================================================

/// Greedy word wrap to `width` columns.
///
/// Blank lines and leading indentation survive; words longer than a line
/// are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(MIN_WRAP_WIDTH);
    let mut lines = Vec::new();

    for raw in text.lines() {
        let rest = raw.trim_start();
        let indent = &raw[..raw.len() - rest.len()];
        if rest.is_empty() {
            lines.push(String::new());
            continue;
        }
        let avail = width.saturating_sub(indent.chars().count()).max(MIN_WRAP_WIDTH / 2);

        let mut current = String::new();
        let mut current_len = 0;
        for word in rest.split_whitespace() {
            let mut word = word;
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > avail {
                lines.push(format!("{indent}{current}"));
                current.clear();
                current_len = 0;
            }
            while word.chars().count() > avail {
                let split = word.char_indices().nth(avail).map_or(word.len(), |(i, _)| i);
                lines.push(format!("{indent}{}", &word[..split]));
                word = &word[split..];
            }
            if word.is_empty() {
                continue;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word.chars().count();
        }
        if current_len > 0 {
            lines.push(format!("{indent}{current}"));
        }
    }

    lines
}
