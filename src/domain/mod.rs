//! Domain layer for the image finder plugin.
//!
//! Core types shared by the controller, the search transport helpers and the
//! renderers, kept free of Zellij APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Search hits and result pages
//! - [`notification`]: One-shot notifications raised by the controller
//!
//! # Examples
//!
//! ```
//! use imagefinder::domain::{ImageItem, SearchPage};
//!
//! let page = SearchPage {
//!     total_hits: 1,
//!     hits: vec![ImageItem::new(1, "thumb.jpg", "full.jpg")],
//! };
//! assert_eq!(page.total_pages(), 1);
//! ```

pub mod error;
pub mod image;
pub mod notification;

pub use error::{ImageFinderError, Result, SearchError};
pub use image::{ImageItem, SearchPage, PAGE_SIZE};
pub use notification::{Notification, NotificationLevel};
