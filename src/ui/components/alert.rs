//! Alert banner renderer.

use crate::ui::helpers::{clear_line, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AlertView;

/// Renders the banner across the whole line, or blanks the line when there is
/// no alert so an expired one disappears.
pub fn render_alert(row: usize, alert: Option<&AlertView>, theme: &Theme, cols: usize) -> usize {
    let Some(alert) = alert else {
        clear_line(row, cols);
        return row + 1;
    };

    let (fg, bg) = theme.alert_colors(alert.kind);
    position_cursor(row, 1);
    print!("{}{}{}", Theme::bold(), Theme::fg(fg), Theme::bg(bg));
    print!("{}", pad_right(&format!(" {}", alert.message), cols));
    print!("{}", Theme::reset());
    row + 1
}
