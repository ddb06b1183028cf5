//! Page and search coordinates of the product list.
//!
//! The server owns pagination: the client sends `page`, `search` and the optional
//! status filter, then stores whatever `current_page`/`pages` the server reports.

use serde::Deserialize;

use super::movement::MovementRecord;
use super::product::{Product, StockStatus};

/// Current page, page count, search term and status filter.
///
/// `current` and `total` are always at least 1. Changing the search term or the
/// filter resets `current` to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub current: u32,
    pub total: u32,
    pub search: String,
    pub status: Option<StockStatus>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current: 1,
            total: 1,
            search: String::new(),
            status: None,
        }
    }
}

impl PageState {
    /// Sets the search term and goes back to the first page.
    pub fn set_search(&mut self, term: String) {
        self.search = term;
        self.current = 1;
    }

    /// Advances the status filter: all → OK → BAIXO → ESGOTADO → all.
    ///
    /// Returns the new filter. The page resets to 1.
    pub fn cycle_status(&mut self) -> Option<StockStatus> {
        self.status = match self.status {
            None => Some(StockStatus::Ok),
            Some(StockStatus::Ok) => Some(StockStatus::Low),
            Some(StockStatus::Low) => Some(StockStatus::Depleted),
            Some(StockStatus::Depleted) => None,
        };
        self.current = 1;
        self.status
    }

    /// Stores the server-reported coordinates, keeping `current` within
    /// `[1, total]`.
    ///
    /// The server echoes the requested page even when it lies past the last one.
    pub fn apply_server(&mut self, current_page: u32, pages: u32) {
        self.total = pages.max(1);
        self.current = current_page.clamp(1, self.total);
    }

    /// Query for fetching `page` with the current search term and filter.
    #[must_use]
    pub fn query(&self, page: u32) -> ProductQuery {
        ProductQuery {
            page: page.max(1),
            search: self.search.clone(),
            status: self.status,
        }
    }
}

/// Parameters of one product-list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub search: String,
    pub status: Option<StockStatus>,
}

/// Body of a successful `GET /api/produtos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    pub produtos: Vec<Product>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

/// Body of a successful `GET /api/movimentacoes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementPage {
    pub movimentacoes: Vec<MovementRecord>,
}
