//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij plugins run in a WASI sandbox where the host's home directory is
//! mounted under `/host`; these helpers translate between the two views.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
