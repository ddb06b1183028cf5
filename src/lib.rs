//! Stockboard: a Zellij plugin for an inventory (stock control) dashboard.
//!
//! Stockboard talks to an inventory HTTP API and provides:
//! - Dashboard counters: total products, stock OK, low stock, depleted
//! - A paginated, searchable product table with a status filter
//! - An add-product form and stock entry/exit forms bound to table rows
//! - Per-product movement history
//! - Transient success/error alerts

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Forms, debounce, alerts                          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ API Layer     │
//! │ (ui/)         │                       │ (api/)        │
//! │ - Rendering   │                       │ - Requests    │
//! │ - Theming     │                       │ - Decoding    │
//! │ - Pagination  │                       │ - Staleness   │
//! └───────────────┘                       └───────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Products, movements, pages, errors (domain/)     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to rotating OTLP files     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O on its own: [`handle_event`] returns
//! [`Action`]s (HTTP requests, timers) that the shim hands to the Zellij host,
//! and results come back as events.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/stockboard.wasm" {
//!         api_url "http://localhost:5000"
//!         per_page "20"
//!         search_debounce_ms "500"
//!         alert_timeout_ms "5000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use stockboard::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     api_url: "http://estoque.local:8080".to_string(),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Started, Instant::now())?;
//! let Action::Http(request) = &actions[0] else { unreachable!() };
//! assert!(request.url.starts_with("http://estoque.local:8080/api/"));
//! # Ok::<(), stockboard::StockboardError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Result, StockboardError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use api::client::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
use api::ApiClient;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/stockboard.wasm" {
///     api_url "http://localhost:5000"
///     theme_file "~/.config/stockboard/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the inventory API. Default: `http://localhost:5000`
    pub api_url: String,

    /// Products requested per page. Default: 20
    pub per_page: u32,

    /// Quiet period after the last search keystroke before the list reloads.
    /// Default: 500
    pub search_debounce_ms: u64,

    /// How long alerts stay visible. Default: 5000
    pub alert_timeout_ms: u64,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is resolved against the sandbox's
    /// `/host` mount. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter directive: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            search_debounce_ms: 500,
            alert_timeout_ms: 5000,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or unparseable values fall back to the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use stockboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://10.0.0.5:5000".to_string());
    /// map.insert("per_page".to_string(), "many".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://10.0.0.5:5000");
    /// assert_eq!(config.per_page, 20);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            per_page: parse_or(config, "per_page", defaults.per_page),
            search_debounce_ms: parse_or(config, "search_debounce_ms", defaults.search_debounce_ms),
            alert_timeout_ms: parse_or(config, "alert_timeout_ms", defaults.alert_timeout_ms),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn parse_or<T: FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    config
        .get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Builds the application state from configuration.
///
/// No requests are issued here; loading starts with [`Event::Started`] once the
/// host grants network access.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, per_page = config.per_page, "initializing stockboard plugin");

    let client = ApiClient::new(&config.api_url, config.per_page);
    AppState::new(client, config.theme()).with_timings(
        Duration::from_millis(config.search_debounce_ms),
        Duration::from_millis(config.alert_timeout_ms),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_option() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://estoque:8080/"),
            ("per_page", "50"),
            ("search_debounce_ms", " 250 "),
            ("alert_timeout_ms", "1000"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_url, "http://estoque:8080/");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.alert_timeout_ms, 1000);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "   "),
            ("search_debounce_ms", "-3"),
            ("alert_timeout_ms", "soon"),
        ]));

        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.alert_timeout_ms, 5000);
    }

    #[test]
    fn initialize_applies_client_and_theme() {
        let config = Config {
            api_url: "http://estoque:8080/".to_string(),
            per_page: 0,
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };

        let state = initialize(&config);

        assert_eq!(state.client.base_url(), "http://estoque:8080");
        assert_eq!(state.client.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Default::default()
        };

        assert_eq!(config.theme(), Theme::default());
    }
}
