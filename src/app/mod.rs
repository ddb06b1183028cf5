//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain/api/ui
//! layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── API Responses / Ticks ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`alert`]: The transient alert banner
//! - [`debounce`]: Deadline-based debouncing for the search input
//! - [`forms`]: Modal form state and number coercion
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod alert;
pub mod debounce;
pub mod forms;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ModalKind};
pub use state::AppState;
