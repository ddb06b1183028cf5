//! Pagination bar renderer.

use crate::ui::helpers::{char_width, clear_line, clip, position_cursor};
use crate::ui::pagination::{PageItem, PaginationView};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Enabled,
    Disabled,
    Active,
}

/// Renders the bar at `row`, or blanks it when there is a single page.
///
/// ```text
///  ‹ Anterior  1 … 4 5 [6] 7 8 … 12  Próxima ›              Total: 231 produtos
/// ```
pub fn render_pagination(row: usize, view: Option<&PaginationView>, theme: &Theme, cols: usize) {
    clear_line(row, cols);
    let Some(view) = view else {
        return;
    };

    position_cursor(row, 1);
    let mut used = 0;
    for (text, style) in segments(view) {
        let text = clip(&text, cols.saturating_sub(used));
        used += char_width(&text);
        match style {
            Style::Enabled => print!("{}{text}", Theme::fg(&theme.colors.text_normal)),
            Style::Disabled => print!("{}{text}", Theme::fg(&theme.colors.disabled_fg)),
            Style::Active => print!(
                "{}{}{}{text}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg),
                Theme::reset()
            ),
        }
    }

    let label = format!("{} ", view.label);
    let label_width = char_width(&label);
    if used + label_width < cols {
        print!("{}", " ".repeat(cols - used - label_width));
        print!("{}{label}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", Theme::reset());
}

/// The bar as styled text runs, separators included, laid out by
/// [`PaginationView::columns`] so clicks and drawing agree.
fn segments(view: &PaginationView) -> Vec<(String, Style)> {
    let mut out = Vec::new();
    let mut col = 0;
    for (start, item) in view.columns() {
        out.push((" ".repeat(start - col), Style::Enabled));

        let style = match item {
            PageItem::Page { active: true, .. } => Style::Active,
            PageItem::Prev(None) | PageItem::Next(None) | PageItem::Ellipsis => Style::Disabled,
            _ => Style::Enabled,
        };
        let text = item.display();
        col = start + char_width(&text);
        out.push((text, style));
    }
    out
}
