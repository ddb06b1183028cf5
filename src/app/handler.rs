//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input, timer
//! ticks and API responses, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime, already mapped from Zellij events
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions (HTTP requests, timers) are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Started`, `PermissionDenied`, `Tick`
//! - **Network**: `ApiResponse`
//! - **Navigation**: `SelectNext`, `SelectPrev`, `PrevPage`, `NextPage`, `FirstPage`, `LastPage`
//! - **Search**: `FocusSearch`, `LeaveSearch`, `CycleStatusFilter`
//! - **Input**: `Char`, `Backspace` (routed by input mode)
//! - **Modals**: `OpenAddProduct`, `OpenMovement`, `OpenHistory`, `NextField`,
//!   `PrevField`, `Submit`, `CloseModal`
//! - **Mouse**: `Click` (modal backdrop, pagination bar)
//!
//! Time is passed in explicitly so debounce and alert deadlines are deterministic.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use stockboard::api::ApiClient;
//! use stockboard::app::{handle_event, Action, AppState, Event};
//! use stockboard::ui::theme::Theme;
//!
//! let mut state = AppState::new(ApiClient::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Started, Instant::now())?;
//! assert!(render);
//! assert!(actions.iter().all(|a| matches!(a, Action::Http(_))));
//! # Ok::<(), stockboard::StockboardError>(())
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use crate::app::alert::AlertKind;
use crate::app::forms::Form;
use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{MovementKind, StockboardError};

/// Events triggered by user input, timers, or API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Network access was granted; load the dashboard and the first page.
    Started,
    /// Network access was denied.
    PermissionDenied,
    /// A scheduled timer fired.
    Tick,
    /// An HTTP request completed.
    ApiResponse {
        /// Context map the request was issued with.
        context: BTreeMap<String, String>,
        /// HTTP status; 0 or other non-2xx values when the host could not connect.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
    /// Left click at a 0-based pane position.
    Click {
        line: usize,
        col: usize,
    },

    /// Moves the row selection down (wraps to top).
    SelectNext,
    /// Moves the row selection up (wraps to bottom).
    SelectPrev,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    /// Navigates to a specific page.
    GoToPage(u32),

    /// Gives the search input focus.
    FocusSearch,
    /// Returns focus from the search input to the table.
    LeaveSearch,
    /// Cycles the stock status filter.
    CycleStatusFilter,
    /// Reloads the dashboard and the current page.
    Refresh,
    /// Hides the alert banner.
    DismissAlert,

    /// Types a character into the search input or the focused form field.
    Char(char),
    /// Deletes the last character of the search input or the focused form field.
    Backspace,

    OpenAddProduct,
    /// Opens the movement form for the selected row.
    OpenMovement(MovementKind),
    /// Opens the movement history for the selected row.
    OpenHistory,
    NextField,
    PrevField,
    Submit,
    CloseModal,

    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
/// * `now` - Current time, used for debounce and alert deadlines
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Returns [`StockboardError::Decode`] for responses carrying a context this plugin
/// did not issue. Request failures are not errors here: they become alerts.
#[allow(clippy::too_many_lines)]
pub fn handle_event(
    state: &mut AppState,
    event: &Event,
    now: Instant,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Started => {
            tracing::debug!("loading dashboard and products");
            Ok((true, state.load_all()))
        }
        Event::PermissionDenied => {
            state.loading = false;
            let alert = state.show_alert(
                "Erro de conexão: permissão de acesso à rede negada",
                AlertKind::Error,
                now,
            );
            Ok((true, vec![alert]))
        }
        Event::Tick => Ok(state.on_tick(now)),
        Event::ApiResponse { context, status, body } => {
            state.apply_response(context, *status, body, now)
        }
        Event::Click { line, col } => match state.modal_contains(*line, *col) {
            Some(false) => {
                tracing::debug!(line, col, "backdrop click");
                state.close_modal();
                Ok((true, vec![]))
            }
            Some(true) => Ok((false, vec![])),
            None => {
                let target = state.pagination_target(*line, *col);
                Ok(navigate(state, target))
            }
        },
        Event::SelectNext => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectPrev => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::PrevPage => {
            let (prev, _) = state.adjacent_pages();
            Ok(navigate(state, prev))
        }
        Event::NextPage => {
            let (_, next) = state.adjacent_pages();
            Ok(navigate(state, next))
        }
        Event::FirstPage => {
            let target = (state.page.current != 1).then_some(1);
            Ok(navigate(state, target))
        }
        Event::LastPage => {
            let last = state.page.total;
            let target = (state.page.current != last).then_some(last);
            Ok(navigate(state, target))
        }
        Event::GoToPage(page) => Ok(navigate(state, Some(*page))),
        Event::FocusSearch => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::LeaveSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::CycleStatusFilter => Ok((true, vec![state.cycle_status_filter()])),
        Event::Refresh => {
            tracing::debug!("manual refresh");
            Ok((true, state.load_all()))
        }
        Event::DismissAlert => Ok((state.dismiss_alert(), vec![])),
        Event::Char(c) => match state.input_mode {
            InputMode::Search => {
                state.search_input.push(*c);
                tracing::trace!(query = %state.search_input, "search input updated");
                Ok((true, vec![state.search_edited(now)]))
            }
            InputMode::Modal(_) => Ok(with_form(state, |form| form.insert_char(*c))),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search => {
                if state.search_input.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, vec![state.search_edited(now)]))
            }
            InputMode::Modal(_) => Ok(with_form(state, |form| form.backspace())),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::OpenAddProduct => {
            state.open_add_modal();
            Ok((true, vec![]))
        }
        Event::OpenMovement(kind) => Ok((state.open_movement_modal(*kind), vec![])),
        Event::OpenHistory => Ok(state
            .open_history_modal()
            .map_or((false, vec![]), |fetch| (true, vec![fetch]))),
        Event::NextField => Ok(with_form(state, |form| form.next_field())),
        Event::PrevField => Ok(with_form(state, |form| form.prev_field())),
        Event::Submit => match state.submit_modal() {
            Ok(actions) => Ok((false, actions)),
            Err(e @ StockboardError::Validation(_)) => {
                Ok((true, vec![state.show_alert(e.to_string(), AlertKind::Error, now)]))
            }
            Err(e) => Err(e),
        },
        Event::CloseModal => {
            state.close_modal();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn navigate(state: &mut AppState, target: Option<u32>) -> (bool, Vec<Action>) {
    match target.and_then(|page| state.go_to_page(page)) {
        Some(fetch) => (true, vec![fetch]),
        None => (false, vec![]),
    }
}

fn with_form(state: &mut AppState, edit: impl FnOnce(&mut dyn Form)) -> (bool, Vec<Action>) {
    match state.active_form_mut() {
        Some(form) => {
            edit(form);
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

/// Event name without payloads, so response bodies stay out of span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Started => "Started",
        Event::PermissionDenied => "PermissionDenied",
        Event::Tick => "Tick",
        Event::ApiResponse { .. } => "ApiResponse",
        Event::Click { .. } => "Click",
        Event::SelectNext => "SelectNext",
        Event::SelectPrev => "SelectPrev",
        Event::PrevPage => "PrevPage",
        Event::NextPage => "NextPage",
        Event::FirstPage => "FirstPage",
        Event::LastPage => "LastPage",
        Event::GoToPage(_) => "GoToPage",
        Event::FocusSearch => "FocusSearch",
        Event::LeaveSearch => "LeaveSearch",
        Event::CycleStatusFilter => "CycleStatusFilter",
        Event::Refresh => "Refresh",
        Event::DismissAlert => "DismissAlert",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::OpenAddProduct => "OpenAddProduct",
        Event::OpenMovement(_) => "OpenMovement",
        Event::OpenHistory => "OpenHistory",
        Event::NextField => "NextField",
        Event::PrevField => "PrevField",
        Event::Submit => "Submit",
        Event::CloseModal => "CloseModal",
        Event::CloseFocus => "CloseFocus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::app::modes::ModalKind;
    use crate::domain::{Product, StockStatus};
    use crate::ui::theme::Theme;

    fn state_with_rows() -> AppState {
        let mut state = AppState::new(ApiClient::default(), Theme::default());
        state.loading = false;
        state.products = vec![Product {
            id: 3,
            descricao: "Açúcar".to_string(),
            unidade: Some("KG".to_string()),
            fornecimento: 0.0,
            estoque: 4.0,
            estoque_minimo: 5.0,
            status_estoque: StockStatus::Low,
            created_at: None,
            updated_at: None,
        }];
        state
    }

    fn http_count(actions: &[Action]) -> usize {
        actions.iter().filter(|a| matches!(a, Action::Http(_))).count()
    }

    #[test]
    fn invalid_quantity_alerts_without_request() {
        let mut state = state_with_rows();
        let now = Instant::now();
        handle_event(&mut state, &Event::OpenMovement(MovementKind::Exit), now).unwrap();
        handle_event(&mut state, &Event::Char('0'), now).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Submit, now).unwrap();

        assert!(render);
        assert_eq!(http_count(&actions), 0);
        assert_eq!(
            state.alert.as_ref().map(|a| a.message.as_str()),
            Some("Quantidade deve ser maior que zero")
        );
        assert_eq!(state.input_mode, InputMode::Modal(ModalKind::Movement));
    }

    #[test]
    fn valid_quantity_posts_movement() {
        let mut state = state_with_rows();
        let now = Instant::now();
        handle_event(&mut state, &Event::OpenMovement(MovementKind::Entry), now).unwrap();
        handle_event(&mut state, &Event::Char('3'), now).unwrap();
        handle_event(&mut state, &Event::NextField, now).unwrap();
        for c in "nf 12".chars() {
            handle_event(&mut state, &Event::Char(c), now).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::Submit, now).unwrap();

        let [Action::Http(request)] = actions.as_slice() else {
            panic!("expected one request, got {actions:?}");
        };
        assert_eq!(request.url, "http://localhost:5000/api/produtos/3/entrada");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, serde_json::json!({"quantidade": 3.0, "observacao": "nf 12"}));
    }

    #[test]
    fn normal_mode_ignores_typing() {
        let mut state = state_with_rows();

        let (render, actions) = handle_event(&mut state, &Event::Char('z'), Instant::now()).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn search_typing_schedules_debounce_timer() {
        let mut state = state_with_rows();
        let now = Instant::now();
        handle_event(&mut state, &Event::FocusSearch, now).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Char('a'), now).unwrap();

        assert!(matches!(actions.as_slice(), [Action::ScheduleTimer(_)]));
        assert_eq!(state.search_input, "a");
        assert!(state.page.search.is_empty());
    }

    #[test]
    fn page_navigation_respects_bounds() {
        let mut state = state_with_rows();
        state.page.current = 1;
        state.page.total = 3;
        let now = Instant::now();

        let (_, at_first) = handle_event(&mut state, &Event::PrevPage, now).unwrap();
        let (_, forward) = handle_event(&mut state, &Event::NextPage, now).unwrap();
        let (_, last) = handle_event(&mut state, &Event::LastPage, now).unwrap();
        let (_, beyond) = handle_event(&mut state, &Event::GoToPage(9), now).unwrap();

        assert!(at_first.is_empty());
        assert_eq!(http_count(&forward), 1);
        assert_eq!(http_count(&last), 1);
        assert!(beyond.is_empty());
    }

    #[test]
    fn escape_closes_modal_and_backdrop_click_too() {
        let mut state = state_with_rows();
        state.set_viewport(30, 100);
        let now = Instant::now();

        handle_event(&mut state, &Event::OpenAddProduct, now).unwrap();
        handle_event(&mut state, &Event::CloseModal, now).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);

        handle_event(&mut state, &Event::OpenAddProduct, now).unwrap();
        handle_event(&mut state, &Event::Click { line: 14, col: 50 }, now).unwrap();
        assert_eq!(state.input_mode, InputMode::Modal(ModalKind::AddProduct));

        handle_event(&mut state, &Event::Click { line: 0, col: 0 }, now).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn clicking_a_page_number_fetches_that_page() {
        let mut state = state_with_rows();
        state.set_viewport(30, 100);
        state.page.current = 1;
        state.page.total = 3;
        state.total_items = 45;
        let now = Instant::now();

        // ` ‹ Anterior  [1] 2 3  Próxima ›` sits on the 27th row.
        let (_, disabled) = handle_event(&mut state, &Event::Click { line: 26, col: 1 }, now).unwrap();
        let (_, elsewhere) = handle_event(&mut state, &Event::Click { line: 10, col: 17 }, now).unwrap();
        let (render, actions) =
            handle_event(&mut state, &Event::Click { line: 26, col: 17 }, now).unwrap();

        assert!(disabled.is_empty());
        assert!(elsewhere.is_empty());
        assert!(render);
        let [Action::Http(request)] = actions.as_slice() else {
            panic!("expected one request, got {actions:?}");
        };
        assert!(request.url.contains("page=2&"));
    }

    #[test]
    fn filter_cycle_refetches_first_page() {
        let mut state = state_with_rows();
        state.page.current = 2;
        state.page.total = 4;

        let (_, actions) = handle_event(&mut state, &Event::CycleStatusFilter, Instant::now()).unwrap();

        let [Action::Http(request)] = actions.as_slice() else {
            panic!("expected fetch");
        };
        assert!(request.url.ends_with("page=1&per_page=20&search=&status=OK"));
    }

    #[test]
    fn foreign_response_is_an_error() {
        let mut state = state_with_rows();
        let event = Event::ApiResponse {
            context: BTreeMap::new(),
            status: 200,
            body: b"{}".to_vec(),
        };

        assert!(handle_event(&mut state, &event, Instant::now()).is_err());
    }
}
