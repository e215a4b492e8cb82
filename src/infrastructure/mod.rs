//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem (rooted at the directory Zellij
//! considers home) is mounted under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
