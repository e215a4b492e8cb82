//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState + ToastQueue → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, fitting, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`toasts`]: Auto-dismissing notification queue

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod toasts;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use toasts::ToastQueue;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, PreviewInfo, SearchBarInfo, StatusLine, ToastInfo, UIViewModel,
};
