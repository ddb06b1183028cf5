//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the view model is handed to the component printers

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
///
/// Prints ANSI-styled output with `print!`; Zellij clears the pane before each
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_dashboard_layout(&viewmodel, &state.theme, rows, cols);
}
