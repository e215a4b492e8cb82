//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain/search layers.
//!
//! ```text
//! Key / WebRequestResult → Event → handle_event → AppState (+ controller) → Actions
//!                            ↑                                                │
//!                            └──────── FetchCompleted ◀── web_request ◀───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Search submission, pagination and fetch outcomes
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine
//! - [`state`]: State container and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, PreviewState, SearchState};
