//! Header component renderer.
//!
//! Renders the title bar: the dashboard name and the current page position,
//! centered in bold on the optional header background.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
/// [padding]  Controle de Estoque · Página 2 de 7  [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", center(&header.title, cols));

    print!("{}", Theme::reset());
    row + 1
}
