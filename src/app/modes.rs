//! Input mode state types for the application.
//!
//! The input mode decides which keybindings are active and how characters are
//! interpreted:
//! - **Normal**: navigation and commands
//! - **Search**: characters edit the search term
//! - **Modal**: characters edit the focused field of the open modal
//!
//! # Example
//!
//! ```rust
//! use stockboard::app::modes::{InputMode, ModalKind};
//!
//! let mode = InputMode::Modal(ModalKind::AddProduct);
//! assert_eq!(mode.modal(), Some(ModalKind::AddProduct));
//! assert_eq!(InputMode::Search.modal(), None);
//! ```

/// Which modal dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// The add-product form.
    AddProduct,

    /// The stock entry/exit form for one product.
    Movement,

    /// Read-only list of a product's latest movements.
    History,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (select), h/l (page), / (search), a (add),
    /// b/e (exit/entry), m (history), f (filter), r (refresh), q (quit).
    Normal,

    /// The search input has focus. Edits are debounced before a fetch is made.
    Search,

    /// A modal dialog has focus.
    Modal(ModalKind),
}

impl InputMode {
    #[must_use]
    pub const fn modal(self) -> Option<ModalKind> {
        match self {
            Self::Modal(kind) => Some(kind),
            _ => None,
        }
    }
}
