//! Rotating suggested prompts for the card variant.
//!
//! DESIGN
//! ======
//! The visible suggestion is a pure function of elapsed time
//! (`index_at`), so a renderer can ask "what shows now" without holding
//! timer state. Event loops that need a wake-up on every change use a
//! [`Ticker`], which wraps a tokio interval and yields the next index.
//! Lists with fewer than two entries never change, so their ticker never
//! fires.

#[cfg(test)]
#[path = "suggestions_test.rs"]
mod suggestions_test;

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::config::{MIN_ROTATION_INTERVAL_MS, WidgetConfig};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionRotator {
    suggestions: Vec<String>,
    interval: Duration,
}

impl SuggestionRotator {
    /// Intervals below the minimum rotation interval are raised to it.
    #[must_use]
    pub fn new(suggestions: Vec<String>, interval: Duration) -> Self {
        Self { suggestions, interval: interval.max(Duration::from_millis(MIN_ROTATION_INTERVAL_MS)) }
    }

    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.suggestions.clone(), config.rotation_interval())
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.suggestions.get(index).map(String::as_str)
    }

    /// Index visible after `elapsed` since the rotation started.
    #[must_use]
    pub fn index_at(&self, elapsed: Duration) -> Option<usize> {
        if self.suggestions.is_empty() {
            return None;
        }
        let steps = elapsed.as_millis() / self.interval.as_millis().max(1);
        let len = self.suggestions.len() as u128;
        usize::try_from(steps % len).ok()
    }

    #[must_use]
    pub fn current_at(&self, elapsed: Duration) -> Option<&str> {
        self.index_at(elapsed).and_then(|index| self.get(index))
    }

    /// Timer that yields each new index, starting one interval from now.
    #[must_use]
    pub fn ticker(&self) -> Ticker {
        let mut interval = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Ticker { interval, index: 0, len: self.suggestions.len() }
    }
}

pub struct Ticker {
    interval: Interval,
    index: usize,
    len: usize,
}

impl Ticker {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Wait for the next rotation and return the new index.
    ///
    /// Pends forever when there is nothing to rotate, which keeps it usable
    /// as a `tokio::select!` branch.
    pub async fn tick(&mut self) -> usize {
        if self.len < 2 {
            std::future::pending::<()>().await;
        }
        self.interval.tick().await;
        self.index = (self.index + 1) % self.len;
        self.index
    }
}
