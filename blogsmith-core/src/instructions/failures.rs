//! Per-model failure tracking over a rolling window
//!
//! A model with three or more failures in the last fifteen minutes is
//! temporarily blocked. A success clears its history.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::warn;

pub const FAILURE_THRESHOLD: usize = 3;

pub fn failure_window() -> Duration {
    Duration::minutes(15)
}

#[derive(Debug, Default)]
pub struct ModelFailureTracker {
    failures: HashMap<String, Vec<DateTime<Utc>>>,
}

impl ModelFailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_failure(&mut self, model: &str) {
        self.record_failure_at(model, Utc::now());
    }

    /// Record a failure at `at`, dropping entries that left the window
    pub fn record_failure_at(&mut self, model: &str, at: DateTime<Utc>) {
        let entries = self.failures.entry(model.to_string()).or_default();
        entries.retain(|t| at.signed_duration_since(*t) < failure_window());
        entries.push(at);

        if entries.len() >= FAILURE_THRESHOLD {
            warn!(
                "Model {} blocked after {} failures in {} minutes",
                model,
                entries.len(),
                failure_window().num_minutes()
            );
        }
    }

    pub fn is_model_temporarily_blocked(&self, model: &str) -> bool {
        self.is_blocked_at(model, Utc::now())
    }

    pub fn is_blocked_at(&self, model: &str, now: DateTime<Utc>) -> bool {
        self.recent_failures(model, now) >= FAILURE_THRESHOLD
    }

    /// Failures of `model` inside the window ending at `now`
    pub fn recent_failures(&self, model: &str, now: DateTime<Utc>) -> usize {
        self.failures
            .get(model)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|t| now.signed_duration_since(**t) < failure_window())
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn clear(&mut self, model: &str) {
        self.failures.remove(model);
    }
}
