//! User interface rendering layer with component-based architecture.
//!
//! Turns application state into ANSI-styled output for the plugin pane.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`pagination`]: Pagination bar model (page window and shortcuts)
//! - [`layout`]: Fixed regions of the pane and modal geometry
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (padding, highlighting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod pagination;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use pagination::{PageItem, PaginationView};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DashboardCards, DisplayItem, FooterInfo, HeaderInfo, ModalView, SearchBarInfo, TableBody,
    UIViewModel,
};
