//! Transient alert banner.

use std::time::{Duration, Instant};

/// Default time an alert stays visible.
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A message shown above the product table until it expires or is dismissed.
///
/// Showing a new alert replaces the current one, along with its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    pub expires_at: Instant,
}

impl Alert {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: AlertKind, now: Instant, timeout: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + timeout,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
