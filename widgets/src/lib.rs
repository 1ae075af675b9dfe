//! Presentation layer for the chat widgets.
//!
//! ARCHITECTURE
//! ============
//! Every variant drives the same `chat_session::RequestController`; this
//! crate only decides how a controller snapshot is drawn. Nothing here
//! touches the network or identity storage.
//!
//! - `config`: static widget configuration loaded from YAML
//! - `variant`: full-page, compact and suggestion-card layouts
//! - `markdown`: agent reply rendering (HTML and terminal text)
//! - `transcript`: one rendered frame of the conversation
//! - `suggestions`: rotating suggested prompts
//! - `widget`: variant + config + controller glue

pub mod config;
pub mod markdown;
pub mod suggestions;
pub mod transcript;
pub mod variant;
pub mod widget;

pub use config::{WidgetConfig, WidgetConfigError};
pub use suggestions::{SuggestionRotator, Ticker};
pub use variant::{BubbleStyle, Layout, SuggestionMode, UnknownVariant, Variant};
pub use widget::ChatWidget;
