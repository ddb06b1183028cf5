//! Composable UI component renderers.
//!
//! Each component prints one region of the pane at the fixed rows defined in
//! [`crate::ui::layout`].
//!
//! # Components
//!
//! - [`header`]: Title bar with the page position
//! - [`dashboard`]: The four stock counters
//! - [`alert`]: Success/error banner
//! - [`search`]: Search input box and status filter
//! - [`table`]: Product list, loading indicator and empty placeholder
//! - [`pagination`]: Page buttons and item total
//! - [`footer`]: Keybinding hints
//! - [`modal`]: Form and history dialogs drawn over everything else

mod alert;
mod dashboard;
mod footer;
mod header;
mod modal;
mod pagination;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use alert::render_alert;
use dashboard::render_dashboard;
use footer::render_footer;
use header::render_header;
use modal::render_modal;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_body, render_table_headers};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full dashboard layout, then the open modal on top of it.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Dashboard cards]
/// [Border]
/// [Alert banner]
/// [Search box - 3 lines]
/// [Table headers]
/// [Table rows / loading / empty]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_dashboard_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_dashboard(current_row, &vm.dashboard, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_alert(current_row, vm.alert.as_ref(), theme, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_table_headers(current_row, theme, cols);
    debug_assert_eq!(current_row, layout::TABLE_FIRST_ROW);

    render_table_body(
        current_row,
        &vm.table,
        theme,
        cols,
        layout::table_capacity(rows),
    );

    let pagination_row = layout::pagination_row(rows);
    let footer_row = layout::footer_row(rows);
    if pagination_row > current_row {
        render_pagination(pagination_row, vm.pagination.as_ref(), theme, cols);
    }
    if footer_row > current_row {
        render_border(footer_row - 1, &theme.colors.border, cols);
        render_footer(footer_row, &vm.footer, theme, cols);
    }

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
}
