//! Markdown rendering for agent replies.
//!
//! Agent output is untrusted: raw HTML blocks and inline tags are dropped
//! before rendering in both the HTML and plain-text paths. User messages are
//! never passed through here; they are shown verbatim.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn parse(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    Parser::new_ext(markdown, options()).filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)))
}

/// Render agent markdown to an HTML fragment for embedding pages.
#[must_use]
pub fn render_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, parse(markdown));
    out
}

// =============================================================================
// PLAIN TEXT
// =============================================================================

/// Render agent markdown to terminal text.
///
/// Block structure survives as blank lines, bullets and indentation; inline
/// emphasis is flattened. Link targets follow the link text in parentheses
/// unless the text already is the target.
#[must_use]
pub fn render_plain(markdown: &str) -> String {
    let mut out = String::new();
    // `Some(n)` for ordered lists holds the next item number.
    let mut lists: Vec<Option<u64>> = Vec::new();
    // (target, offset in `out` where the link text starts)
    let mut links: Vec<(String, usize)> = Vec::new();
    let mut in_code_block = false;

    for event in parse(markdown) {
        match event {
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => {
                out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
            }
            Event::Start(Tag::List(start)) => {
                ensure_newline(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                ensure_newline(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(next)) => {
                        out.push_str(&format!("{next}. "));
                        *next += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => ensure_newline(&mut out),
            Event::Start(Tag::CodeBlock(_)) => {
                ensure_newline(&mut out);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Start(Tag::Link { dest_url, .. }) => links.push((dest_url.to_string(), out.len())),
            Event::End(TagEnd::Link) => {
                if let Some((target, start)) = links.pop() {
                    if out[start..] != target {
                        out.push_str(&format!(" ({target})"));
                    }
                }
            }
            Event::End(TagEnd::TableRow | TagEnd::TableHead) => {
                let row_end = out.trim_end_matches(" | ").len();
                out.truncate(row_end);
                out.push('\n');
            }
            Event::End(TagEnd::TableCell) => out.push_str(" | "),
            Event::End(TagEnd::Table) => out.push('\n'),
            Event::Text(text) if in_code_block => {
                for line in text.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push('`');
                out.push_str(&code);
                out.push('`');
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                ensure_newline(&mut out);
                out.push_str("----\n\n");
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    out.trim_end().to_owned()
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
