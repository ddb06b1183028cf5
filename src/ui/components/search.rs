//! Search bar component renderer.
//!
//! A three-line bordered box with the query on the left and the active status
//! filter on the right. The border takes the accent color while the input is
//! focused.

use crate::ui::helpers::{char_width, pad_left, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search box starting at `row`; returns the row after it.
///
/// ```text
///   ┌──────────────────────────────────────────┐
///   │ Buscar: arroz▏             Status: BAIXO │
///   └──────────────────────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let cursor = if search.focused { "▏" } else { "" };
    let query = format!(" Buscar: {}{cursor}", search.query);
    let filter = format!(" Status: {} ", filter_label(search));
    let query_width = inner_width.saturating_sub(char_width(&filter));

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}{}", Theme::fg(&theme.colors.text_normal), pad_right(&query, query_width));
    print!(
        "{}{}",
        Theme::fg(&theme.colors.text_dim),
        pad_left(&filter, inner_width - query_width)
    );
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}

fn filter_label(search: &SearchBarInfo) -> &'static str {
    search.status_filter.map_or("Todos", |status| status.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StockStatus;

    #[test]
    fn filter_label_names_the_status() {
        let mut search = SearchBarInfo {
            query: String::new(),
            focused: false,
            status_filter: None,
        };
        assert_eq!(filter_label(&search), "Todos");

        search.status_filter = Some(StockStatus::Low);
        assert_eq!(filter_label(&search), "BAIXO");
    }
}
