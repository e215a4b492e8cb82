//! Top-level rendering coordinator.
//!
//! Two steps: compute the view model from [`AppState`] and the runtime's
//! [`ToastQueue`], then hand it to the component renderers. Output goes to
//! stdout, which Zellij captures as the plugin pane's contents.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::toasts::ToastQueue;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane on every
/// render call.
pub fn render(state: &AppState, toasts: &ToastQueue, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols, toasts);
    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
