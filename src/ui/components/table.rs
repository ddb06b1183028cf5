//! Table component renderer.
//!
//! Renders the product list: description, unit, supply, stock, minimum and a
//! colored status column. Shows a loading indicator or the empty placeholder
//! instead of rows when there is nothing to list.

use crate::ui::helpers::{self, center, clear_line, pad_left, pad_right, position_cursor};
use crate::ui::layout::{self, QUANTITY_WIDTH, STATUS_WIDTH, UNIT_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, TableBody};

const LOADING_MESSAGE: &str = "Carregando...";

/// Renders the column headers at `row`.
///
/// ```text
///  DESCRIÇÃO                 UNIDADE      FORNEC.   ESTOQUE    MÍNIMO  STATUS
/// ```
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let line = format_line(
        "DESCRIÇÃO",
        "UNIDADE",
        ["FORNEC.", "ESTOQUE", "MÍNIMO"],
        "STATUS",
        cols,
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad_right(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the table body from `row` down, filling `height` lines.
pub fn render_table_body(row: usize, body: &TableBody, theme: &Theme, cols: usize, height: usize) {
    for offset in 0..height {
        clear_line(row + offset, cols);
    }

    match body {
        TableBody::Loading => render_placeholder(row, LOADING_MESSAGE, theme, cols, height),
        TableBody::Empty { message } => render_placeholder(row, message, theme, cols, height),
        TableBody::Rows { items, .. } => {
            for (offset, item) in items.iter().take(height).enumerate() {
                render_table_row(row + offset, item, theme, cols);
            }
        }
    }
}

fn render_placeholder(row: usize, message: &str, theme: &Theme, cols: usize, height: usize) {
    if height == 0 {
        return;
    }
    position_cursor(row + height.min(3) / 2, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(message, cols));
    print!("{}", Theme::reset());
}

/// Renders one product line.
///
/// The selected row gets the selection colors across the full width; the
/// status column keeps its own color on unselected rows.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(row, 1);
    print!("{base} ");

    let description_width = layout::description_width(cols);
    helpers::render_highlighted_text(
        &item.description,
        &item.highlight_ranges,
        theme,
        item.is_selected,
    );
    print!(
        "{}",
        " ".repeat(description_width.saturating_sub(helpers::char_width(&item.description)))
    );

    print!("  {}", pad_right(&item.unit, UNIT_WIDTH));
    for quantity in [&item.supply, &item.stock, &item.minimum] {
        print!("{}", pad_left(quantity, QUANTITY_WIDTH));
    }
    print!("  ");

    if !item.is_selected {
        print!("{}", Theme::fg(theme.status_color(item.status)));
    }
    print!("{}", Theme::bold());
    print!("{}", pad_right(item.status.as_str(), STATUS_WIDTH));
    print!("{}{base}", Theme::reset());

    let used = 1 + description_width + 2 + UNIT_WIDTH + 3 * QUANTITY_WIDTH + 2 + STATUS_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}

/// Lays out one table line from plain strings.
fn format_line(
    description: &str,
    unit: &str,
    quantities: [&str; 3],
    status: &str,
    cols: usize,
) -> String {
    let mut line = format!(
        " {}  {}",
        pad_right(description, layout::description_width(cols)),
        pad_right(unit, UNIT_WIDTH)
    );
    for quantity in quantities {
        line.push_str(&pad_left(quantity, QUANTITY_WIDTH));
    }
    line.push_str("  ");
    line.push_str(&pad_right(status, STATUS_WIDTH));
    line
}
