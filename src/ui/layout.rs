//! Fixed regions of the pane.
//!
//! Rows and columns are 1-indexed, matching ANSI cursor positioning.
//!
//! ```text
//!  1  (blank)
//!  2  header
//!  3  ─────
//!  4  dashboard cards
//!  5  ─────
//!  6  alert banner
//!  7  ┌ search ┐
//!  8  │        │
//!  9  └────────┘
//! 10  table headers
//! 11  table rows …
//! -3  pagination bar
//! -2  ─────
//! -1  footer
//! ```

use crate::app::modes::ModalKind;

pub const HEADER_ROW: usize = 2;
pub const DASHBOARD_ROW: usize = 4;
pub const ALERT_ROW: usize = 6;
pub const SEARCH_ROW: usize = 7;
pub const TABLE_HEADER_ROW: usize = 10;
pub const TABLE_FIRST_ROW: usize = 11;

/// Rows below the table: pagination bar, border, footer and one spare line.
const BOTTOM_CHROME: usize = 4;

/// Number of product rows that fit in a pane of `rows` lines.
#[must_use]
pub const fn table_capacity(rows: usize) -> usize {
    rows.saturating_sub(TABLE_FIRST_ROW - 1 + BOTTOM_CHROME)
}

#[must_use]
pub const fn pagination_row(rows: usize) -> usize {
    rows.saturating_sub(3)
}

#[must_use]
pub const fn footer_row(rows: usize) -> usize {
    rows.saturating_sub(1)
}

/// Widths of the numeric and status columns of the product table.
pub const UNIT_WIDTH: usize = 10;
pub const QUANTITY_WIDTH: usize = 10;
pub const STATUS_WIDTH: usize = 10;

/// Everything on a table line except the description column.
const FIXED_COLUMNS: usize = 58;

/// Width of the description column: whatever the other columns leave, at least 12.
#[must_use]
pub const fn description_width(cols: usize) -> usize {
    let width = cols.saturating_sub(FIXED_COLUMNS);
    if width < 12 {
        12
    } else {
        width
    }
}

/// A rectangular area of the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }
}

/// Height of each modal box, borders included.
#[must_use]
pub const fn modal_height(kind: ModalKind) -> usize {
    match kind {
        // title, blank, five fields, blank, hint
        ModalKind::AddProduct => 11,
        // title, product, blank, two fields, blank, hint
        ModalKind::Movement => 9,
        // title, blank, column header, ten entries, blank, hint
        ModalKind::History => 17,
    }
}

const fn modal_max_width(kind: ModalKind) -> usize {
    match kind {
        ModalKind::AddProduct | ModalKind::Movement => 60,
        ModalKind::History => 76,
    }
}

/// The centered box a modal occupies. Anything outside it is backdrop.
///
/// # Examples
///
/// ```
/// use stockboard::app::modes::ModalKind;
/// use stockboard::ui::layout::modal_area;
///
/// let area = modal_area(30, 100, ModalKind::Movement);
/// assert!(area.contains(15, 50));
/// assert!(!area.contains(1, 1));
/// ```
#[must_use]
pub fn modal_area(rows: usize, cols: usize, kind: ModalKind) -> Rect {
    let width = modal_max_width(kind).min(cols.saturating_sub(4)).max(1);
    let height = modal_height(kind).min(rows).max(1);
    Rect {
        row: rows.saturating_sub(height) / 2 + 1,
        col: cols.saturating_sub(width) / 2 + 1,
        width,
        height,
    }
}
