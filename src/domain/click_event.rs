//! Click event model for asynchronous click counting.

use chrono::{DateTime, Utc};

/// A redirect that still has to be counted.
///
/// Redirect handlers create one per successful resolution and push it onto a
/// bounded channel; [`crate::domain::click_worker::run_click_worker`] turns it
/// into an atomic counter increment. The redirect response never waits for it.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            clicked_at: Utc::now(),
        }
    }

    /// Milliseconds the event spent queued before `now`; never negative.
    pub fn queue_delay_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.clicked_at).num_milliseconds().max(0)
    }
}
