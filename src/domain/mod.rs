//! Domain layer for the Stockboard plugin.
//!
//! Types describing the inventory as the REST API reports it, independent of
//! Zellij-specific APIs or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Products, stock status and the add-product payload
//! - [`movement`]: Stock entries and exits
//! - [`dashboard`]: Summary counts
//! - [`page`]: Page/search coordinates and list responses
//!
//! # Examples
//!
//! ```
//! use stockboard::domain::{PageState, Result};
//!
//! fn next_query(page: &PageState) -> Result<u32> {
//!     Ok(page.query(page.current).page + 1)
//! }
//!
//! assert_eq!(next_query(&PageState::default()).unwrap(), 2);
//! ```

pub mod dashboard;
pub mod error;
pub mod movement;
pub mod page;
pub mod product;

pub use dashboard::DashboardSummary;
pub use error::{Result, StockboardError};
pub use movement::{MovementKind, MovementRecord, MovementRequest};
pub use page::{MovementPage, PageState, ProductPage, ProductQuery};
pub use product::{NewProduct, Product, StockStatus};
