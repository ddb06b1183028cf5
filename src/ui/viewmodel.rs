//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data: formatted numbers, highlight ranges,
//! selection flags and the targets of every clickable or keyable element.
//!
//! # Example
//!
//! ```rust
//! use stockboard::ui::viewmodel::{DashboardCards, TableBody};
//! use stockboard::domain::DashboardSummary;
//!
//! let cards = DashboardCards::from_summary(None);
//! assert_eq!(cards.total, "-");
//!
//! let loaded = DashboardCards::from_summary(Some(&DashboardSummary { total_produtos: 12, ..Default::default() }));
//! assert_eq!(loaded.total, "12");
//! assert!(matches!(TableBody::Loading, TableBody::Loading));
//! ```

use crate::app::alert::AlertKind;
use crate::app::modes::ModalKind;
use crate::domain::{DashboardSummary, MovementKind, StockStatus};
use crate::ui::pagination::PaginationView;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub dashboard: DashboardCards,
    pub alert: Option<AlertView>,
    pub search_bar: SearchBarInfo,
    pub table: TableBody,
    /// `None` while loading or when there is at most one page.
    pub pagination: Option<PaginationView>,
    pub footer: FooterInfo,
    pub modal: Option<ModalView>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// The four summary counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCards {
    pub total: String,
    pub ok: String,
    pub low: String,
    pub depleted: String,
}

impl DashboardCards {
    /// Formats a summary; every card shows `-` until the first successful load.
    #[must_use]
    pub fn from_summary(summary: Option<&DashboardSummary>) -> Self {
        let show = |pick: fn(&DashboardSummary) -> u64| {
            summary.map_or_else(|| "-".to_string(), |s| pick(s).to_string())
        };
        Self {
            total: show(|s| s.total_produtos),
            ok: show(|s| s.produtos_ok),
            low: show(|s| s.produtos_baixo),
            depleted: show(|s| s.produtos_esgotados),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub message: String,
    pub kind: AlertKind,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text currently in the input, which may be ahead of the applied search term.
    pub query: String,

    /// Whether keystrokes go to the input.
    pub focused: bool,

    /// Active status filter, shown next to the query.
    pub status_filter: Option<StockStatus>,
}

/// What the product table area shows.
///
/// Loading and the table are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Empty { message: String },
    Rows {
        items: Vec<DisplayItem>,
        /// Index of the selected item within `items`.
        selected_index: usize,
    },
}

/// One product row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Product this row is bound to; row actions use it.
    pub product_id: i64,
    pub description: String,
    pub unit: String,
    pub supply: String,
    pub stock: String,
    pub minimum: String,
    pub status: StockStatus,
    pub is_selected: bool,

    /// Character ranges of the description matching the search term.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// An open modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Form(FormView),
    History(HistoryView),
}

impl ModalView {
    #[must_use]
    pub const fn kind(&self) -> ModalKind {
        match self {
            Self::Form(form) => form.kind,
            Self::History(_) => ModalKind::History,
        }
    }
}

/// A form modal: add product or stock movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub kind: ModalKind,
    pub title: String,
    /// Product the form is bound to, for movements.
    pub subtitle: Option<String>,
    pub fields: Vec<FieldView>,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    pub focused: bool,
}

/// The movement history modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub title: String,
    pub loading: bool,
    pub entries: Vec<HistoryEntryView>,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntryView {
    pub kind: MovementKind,
    pub kind_label: String,
    pub quantity: String,
    pub note: String,
    pub date: String,
}
