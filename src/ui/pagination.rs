//! Pagination bar model.
//!
//! The bar shows a window of up to five page numbers around the current page, with
//! shortcuts to the first and last pages when the window does not reach them:
//!
//! ```text
//! ‹ Anterior  1 …  4  5 [6] 7  8  … 12  Próxima ›      Total: 231 produtos
//! ```
//!
//! Every item carries the page it navigates to, so the handler never recomputes
//! targets from labels.

/// Number of pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// Column of the first item in the rendered bar.
const BAR_INDENT: usize = 1;

/// One element of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Previous page; `None` when already on the first page.
    Prev(Option<u32>),
    /// A numbered page button.
    Page { number: u32, active: bool },
    /// Gap between a shortcut and the window.
    Ellipsis,
    /// Next page; `None` when already on the last page.
    Next(Option<u32>),
}

impl PageItem {
    /// Page this item navigates to, if it is enabled.
    #[must_use]
    pub const fn target(self) -> Option<u32> {
        match self {
            Self::Prev(target) | Self::Next(target) => target,
            Self::Page { number, .. } => Some(number),
            Self::Ellipsis => None,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Prev(_) => "‹ Anterior".to_string(),
            Self::Next(_) => "Próxima ›".to_string(),
            Self::Page { number, .. } => number.to_string(),
            Self::Ellipsis => "…".to_string(),
        }
    }

    /// Text as drawn in the bar; the active page is bracketed.
    #[must_use]
    pub fn display(self) -> String {
        match self {
            Self::Page { number, active: true } => format!("[{number}]"),
            _ => self.label(),
        }
    }

    fn width(self) -> usize {
        self.display().chars().count()
    }
}

/// The computed pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub items: Vec<PageItem>,
    /// First page of the numbered window.
    pub start: u32,
    /// Last page of the numbered window.
    pub end: u32,
    /// `Total: N produtos`.
    pub label: String,
}

impl PaginationView {
    /// Builds the bar for `current` of `total` pages, or `None` when there is at most
    /// one page.
    ///
    /// `current` is clamped into `[1, total]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockboard::ui::pagination::{PageItem, PaginationView};
    ///
    /// let view = PaginationView::compute(6, 12, 231).unwrap();
    /// assert_eq!((view.start, view.end), (4, 8));
    /// assert_eq!(view.items[1], PageItem::Page { number: 1, active: false });
    /// assert_eq!(view.items[2], PageItem::Ellipsis);
    /// assert_eq!(view.label, "Total: 231 produtos");
    ///
    /// assert!(PaginationView::compute(1, 1, 3).is_none());
    /// ```
    #[must_use]
    pub fn compute(current: u32, total: u32, total_items: u64) -> Option<Self> {
        if total <= 1 {
            return None;
        }
        let current = current.clamp(1, total);
        let start = current.saturating_sub(WINDOW_RADIUS).max(1);
        let end = current.saturating_add(WINDOW_RADIUS).min(total);

        let mut items = Vec::with_capacity(end as usize - start as usize + 7);
        items.push(PageItem::Prev((current > 1).then(|| current - 1)));

        if start > 1 {
            items.push(PageItem::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }

        items.extend((start..=end).map(|number| PageItem::Page {
            number,
            active: number == current,
        }));

        if end < total {
            if end + 1 < total {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: total,
                active: false,
            });
        }

        items.push(PageItem::Next((current < total).then(|| current + 1)));

        Some(Self {
            items,
            start,
            end,
            label: format!("Total: {total_items} produtos"),
        })
    }

    /// Each item paired with the 0-based column it starts at in the rendered bar.
    ///
    /// Prev and next are set apart from the numbers by two spaces, everything
    /// else by one.
    #[must_use]
    pub fn columns(&self) -> Vec<(usize, PageItem)> {
        let mut col = BAR_INDENT;
        let mut out = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().copied().enumerate() {
            if index > 0 {
                col += if index == 1 || matches!(item, PageItem::Next(_)) { 2 } else { 1 };
            }
            out.push((col, item));
            col += item.width();
        }
        out
    }

    /// The item drawn at 0-based column `col`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockboard::ui::pagination::{PageItem, PaginationView};
    ///
    /// let view = PaginationView::compute(2, 3, 45).unwrap();
    /// assert_eq!(view.item_at(1), Some(PageItem::Prev(Some(1))));
    /// assert_eq!(view.item_at(0), None);
    /// ```
    #[must_use]
    pub fn item_at(&self, col: usize) -> Option<PageItem> {
        self.columns()
            .into_iter()
            .find(|(start, item)| (*start..start + item.width()).contains(&col))
            .map(|(_, item)| item)
    }
}
