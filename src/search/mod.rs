//! Search transport helpers.
//!
//! The controller never performs I/O. It emits a [`SearchRequest`], the
//! plugin runtime turns it into a Zellij `web_request` using [`SearchApi`],
//! and the reply is decoded with [`decode_response`] before being handed back
//! to the controller together with the original [`RequestTag`].
//!
//! ```text
//! controller ──Action::Fetch(SearchRequest)──▶ runtime ──web_request──▶ Pixabay
//!     ▲                                                                   │
//!     └──Event::FetchCompleted { tag, outcome } ◀── decode_response ◀─────┘
//! ```

pub mod request;
pub mod response;

pub use request::{RequestTag, SearchApi, SearchRequest};
pub use response::decode_response;
