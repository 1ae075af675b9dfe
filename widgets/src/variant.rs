//! Widget variants and their layout parameters.
//!
//! All three variants share the same session controller; they differ only
//! in how much chrome they draw and how suggestions are offered.

#[cfg(test)]
#[path = "variant_test.rs"]
mod variant_test;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown widget variant '{0}' (expected full, compact or card)")]
pub struct UnknownVariant(pub String);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Full-page chat with header, description and a suggestion list.
    #[default]
    FullPage,
    /// Narrow embedded chat: title bar and transcript only.
    Compact,
    /// Card that cycles through one suggestion at a time.
    SuggestionCard,
}

/// How a message bubble is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleStyle {
    /// Role label on its own line, content indented below.
    Labelled,
    /// Role marker prefixed to every content line.
    Prefixed,
    /// Content framed by a box rule.
    Boxed,
}

/// How suggested prompts are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionMode {
    Hidden,
    /// Numbered list, shown while the conversation is empty.
    List,
    /// One suggestion at a time, always shown.
    Rotating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Total columns available to the transcript.
    pub width: usize,
    pub bubble: BubbleStyle,
    pub show_header: bool,
    pub show_description: bool,
    pub suggestions: SuggestionMode,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::FullPage, Self::Compact, Self::SuggestionCard];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FullPage => "full",
            Self::Compact => "compact",
            Self::SuggestionCard => "card",
        }
    }

    #[must_use]
    pub fn layout(self) -> Layout {
        match self {
            Self::FullPage => Layout {
                width: 80,
                bubble: BubbleStyle::Labelled,
                show_header: true,
                show_description: true,
                suggestions: SuggestionMode::List,
            },
            Self::Compact => Layout {
                width: 48,
                bubble: BubbleStyle::Prefixed,
                show_header: true,
                show_description: false,
                suggestions: SuggestionMode::Hidden,
            },
            Self::SuggestionCard => Layout {
                width: 60,
                bubble: BubbleStyle::Boxed,
                show_header: true,
                show_description: true,
                suggestions: SuggestionMode::Rotating,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full-page" | "page" => Ok(Self::FullPage),
            "compact" => Ok(Self::Compact),
            "card" | "suggestion-card" => Ok(Self::SuggestionCard),
            _ => Err(UnknownVariant(s.to_owned())),
        }
    }
}
