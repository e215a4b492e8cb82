//! Input mode state machine.
//!
//! The plugin is either browsing results ([`InputMode::Normal`]) or editing
//! the query in the search bar ([`InputMode::Editing`]). The preview overlay
//! is not a mode of its own: while it is open every key is routed to it, see
//! [`crate::app::state::PreviewState`].

/// Current input handling mode.
///
/// Controls which keybindings are active and which footer hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Browsing the result list.
    ///
    /// Available keybindings: j/k (navigate), Enter (preview), / (edit query),
    /// m (load more), q (quit).
    #[default]
    Normal,

    /// Typing in the search bar.
    ///
    /// Characters and Backspace edit the query, Enter submits it, Esc returns
    /// to [`InputMode::Normal`] without searching.
    Editing,
}
