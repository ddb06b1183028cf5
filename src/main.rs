//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Stockboard library and the Zellij
//! plugin system: it maps host events to library events, and library actions to
//! host calls. All state transitions live in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; loading starts once it is granted
//! 3. **Subscribe**: Key, Mouse, Timer, `WebRequestResult`, `PermissionRequestResult`
//! 4. **Update**: Map the event, call `handle_event`, execute the returned actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult(Granted)` → `Event::Started`
//! - `WebRequestResult(status, _, body, context)` → `Event::ApiResponse`
//! - `Timer` → `Event::Tick`
//! - `Mouse(LeftClick)` → `Event::Click`
//! - `Key` → depends on the input mode (see below)
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`k`/`Down`/`Up`: Move selection
//! - `h`/`l`/`Left`/`Right`: Previous/next page
//! - `g`/`G`/`Home`/`End`: First/last page
//! - `/`: Focus search
//! - `f`: Cycle status filter
//! - `a`: Add product
//! - `e`/`b`: Stock entry/exit for the selected product
//! - `m`: Movement history for the selected product
//! - `r`: Refresh
//! - `x`: Dismiss alert
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters and `Backspace` edit the search term
//! - `Enter`/`Esc`: Back to the table
//!
//! In a modal:
//! - Characters and `Backspace` edit the focused field
//! - `Tab`/`Down`: Next field; `Shift+Tab`/`Up`: Previous field
//! - `Enter`: Submit; `Esc`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;

use zellij_tile::prelude::*;

use stockboard::api::{ApiRequest, HttpMethod};
use stockboard::app::ModalKind;
use stockboard::domain::MovementKind;
use stockboard::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: stockboard::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: stockboard::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        stockboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.app = stockboard::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Tick,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::ApiResponse {
                    context,
                    status,
                    body,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading data");
                    Event::Started
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - the dashboard cannot load data");
                    Event::PermissionDenied
                }
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        stockboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key),
            InputMode::Search => Self::map_search_key(key),
            InputMode::Modal(kind) => Self::map_modal_key(key, kind),
        }
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::SelectNext),
                BareKey::Char('p') => Some(Event::SelectPrev),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::SelectNext,
            BareKey::Up | BareKey::Char('k') => Event::SelectPrev,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Home | BareKey::Char('g') => Event::FirstPage,
            BareKey::End | BareKey::Char('G') => Event::LastPage,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('f') => Event::CycleStatusFilter,
            BareKey::Char('a') => Event::OpenAddProduct,
            BareKey::Char('e') => Event::OpenMovement(MovementKind::Entry),
            BareKey::Char('b') => Event::OpenMovement(MovementKind::Exit),
            BareKey::Char('m') => Event::OpenHistory,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('x') => Event::DismissAlert,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc | BareKey::Enter => Event::LeaveSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_modal_key(key: &KeyWithModifier, kind: ModalKind) -> Option<Event> {
        if kind == ModalKind::History {
            return matches!(key.bare_key, BareKey::Esc | BareKey::Char('q'))
                .then_some(Event::CloseModal);
        }

        Some(match key.bare_key {
            BareKey::Esc => Event::CloseModal,
            BareKey::Enter => Event::Submit,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    /// Left clicks only; the host reports 0-based positions.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => usize::try_from(line)
                .ok()
                .map(|line| Event::Click { line, col }),
            _ => None,
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Http(request) => Self::send_request(request),
            Action::ScheduleTimer(delay) => {
                tracing::debug!(delay_ms = delay.as_millis(), "scheduling timer");
                set_timeout(delay.as_secs_f64());
            }
        }
    }

    fn send_request(request: &ApiRequest) {
        tracing::debug!(url = %request.url, method = ?request.method, "sending web request");

        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
        };
        web_request(
            request.url.as_str(),
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context.to_map(),
        );
    }
}
