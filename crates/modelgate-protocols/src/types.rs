//! Query result types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token counters reported by a backend, keyed by the backend's own field name.
pub type Usage = HashMap<String, i64>;

/// Prefix of the synthetic fragment carrying the backend's stop reason.
pub const STOP_PREFIX: &str = "stop: ";

/// Result of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text, one entry per text-bearing block in backend order.
    /// Ends with `"stop: <reason>"` when the backend reported a stop reason.
    pub fragments: Vec<String>,

    /// Backend usage counters.
    pub usage: Usage,

    /// Stop or finish reason reported by the backend, if non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl Completion {
    /// Build a completion, appending the stop fragment when `stop_reason`
    /// is present and non-empty.
    pub fn new(mut fragments: Vec<String>, stop_reason: Option<&str>, usage: Usage) -> Self {
        let stop_reason = stop_reason.filter(|r| !r.is_empty()).map(str::to_string);
        if let Some(reason) = &stop_reason {
            fragments.push(format!("{STOP_PREFIX}{reason}"));
        }
        Self {
            fragments,
            usage,
            stop_reason,
        }
    }

    /// The stop reason reported by the backend, if any.
    pub fn stop_reason(&self) -> Option<&str> {
        self.stop_reason.as_deref()
    }

    /// Generated text without the stop fragment.
    pub fn text(&self) -> String {
        let end = if self.stop_reason.is_some() {
            self.fragments.len().saturating_sub(1)
        } else {
            self.fragments.len()
        };
        self.fragments[..end].concat()
    }

    /// Counter value for `field`, or 0 when the backend does not report it.
    pub fn tokens(&self, field: &str) -> i64 {
        self.usage.get(field).copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
