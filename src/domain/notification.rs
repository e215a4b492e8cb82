//! Fire-and-forget user notifications.
//!
//! The search controller raises notifications as outbound messages and never
//! waits on them. Display, stacking and expiry belong to
//! [`crate::ui::toasts::ToastQueue`].

/// Message shown when a fetch returns no hits.
pub const NO_IMAGES_MESSAGE: &str = "...ooops! No images";

/// Message shown when the first page of a search arrives with hits.
pub const FETCHED_MESSAGE: &str = "Your images were successfully fetched!";

/// Notification category, which drives the toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Informational, e.g. an empty result page.
    Info,
    /// A search completed with results.
    Success,
    /// A search request failed.
    Error,
}

impl NotificationLevel {
    /// Short label rendered in front of the toast message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "ok",
            Self::Error => "error",
        }
    }
}

/// A one-shot notification raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}
