//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a `Vec<Action>`
//! after each event and the plugin shim executes them in order: HTTP requests go to
//! `web_request`, timers to `set_timeout`.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use stockboard::app::Action;
//!
//! let actions = vec![Action::ScheduleTimer(Duration::from_millis(520))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::ApiRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q').
    CloseFocus,

    /// Sends an HTTP request through the host.
    ///
    /// The response comes back as an `ApiResponse` event carrying the request's
    /// context map.
    Http(ApiRequest),

    /// Asks the host for a `Tick` event after the given delay.
    ///
    /// Used for the search debounce and the alert timeout.
    ScheduleTimer(Duration),
}
