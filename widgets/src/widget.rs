//! A widget variant bound to a session controller.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use std::sync::Arc;

use chat_session::{RequestController, SubmitOutcome};
use tracing::debug;

use crate::config::WidgetConfig;
use crate::markdown::render_html;
use crate::suggestions::SuggestionRotator;
use crate::transcript;
use crate::variant::{Layout, SuggestionMode, Variant};

pub struct ChatWidget {
    variant: Variant,
    layout: Layout,
    config: WidgetConfig,
    rotator: SuggestionRotator,
    controller: Arc<RequestController>,
}

impl ChatWidget {
    #[must_use]
    pub fn new(variant: Variant, config: WidgetConfig, controller: Arc<RequestController>) -> Self {
        let rotator = SuggestionRotator::from_config(&config);
        Self { variant, layout: variant.layout(), config, rotator, controller }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn rotator(&self) -> &SuggestionRotator {
        &self.rotator
    }

    #[must_use]
    pub fn controller(&self) -> &Arc<RequestController> {
        &self.controller
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Input is enabled only while no request is in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.controller.is_loading()
    }

    #[must_use]
    pub fn offers_suggestions(&self) -> bool {
        self.layout.suggestions != SuggestionMode::Hidden && !self.rotator.is_empty()
    }

    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        self.controller.submit(input).await
    }

    /// Submit suggestion `index` (zero-based). `None` if the variant hides
    /// suggestions or the index is out of range.
    pub async fn pick_suggestion(&self, index: usize) -> Option<SubmitOutcome> {
        if !self.offers_suggestions() {
            return None;
        }
        let prompt = self.rotator.get(index)?.to_owned();
        debug!(variant = %self.variant, index, "widget: suggestion picked");
        Some(self.submit(&prompt).await)
    }

    /// Transcript for the current controller snapshot.
    #[must_use]
    pub fn render(&self, rotation: usize) -> String {
        transcript::render(
            &self.controller.messages(),
            &self.controller.state(),
            &self.layout,
            &self.config,
            rotation,
        )
    }

    /// HTML for the newest agent reply, for hosts that embed markup.
    #[must_use]
    pub fn last_reply_html(&self) -> Option<String> {
        self.controller
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == chat_session::Role::Agent)
            .map(|m| render_html(m.content()))
    }
}
