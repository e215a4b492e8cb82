//! Auto-dismissing toast stack.
//!
//! Owned by the plugin runtime, not by [`AppState`](crate::app::AppState):
//! the controller only emits [`Notification`]s and never observes whether or
//! when they are displayed. Timestamps are milliseconds since the Unix epoch,
//! passed in by the caller so the queue stays deterministic under test.

use crate::domain::Notification;
use crate::ui::viewmodel::ToastInfo;
use std::collections::VecDeque;

/// Default on-screen lifetime of a toast.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2000;

/// Toasts drawn at the same time. Older ones wait off-screen until they
/// expire.
pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    notification: Notification,
    raised_at_ms: i64,
    expires_at_ms: i64,
}

#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration_ms: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl ToastQueue {
    #[must_use]
    pub const fn new(duration_ms: u64) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration_ms,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Adds a toast raised at `now_ms`. The newest toast is shown on top.
    pub fn push(&mut self, notification: Notification, now_ms: i64) {
        let lifetime = i64::try_from(self.duration_ms).unwrap_or(i64::MAX);
        tracing::debug!(
            level = ?notification.level,
            message = %notification.message,
            "toast raised"
        );
        self.toasts.push_front(Toast {
            notification,
            raised_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(lifetime),
        });
    }

    /// Drops every toast whose lifetime has elapsed.
    ///
    /// Returns `true` when anything was removed, i.e. the screen needs a
    /// redraw.
    pub fn expire(&mut self, now_ms: i64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at_ms > now_ms);
        before != self.toasts.len()
    }

    /// Milliseconds until the next toast expires, or `None` when the queue is
    /// empty. Used to arm the plugin timer.
    #[must_use]
    pub fn next_deadline_ms(&self, now_ms: i64) -> Option<u64> {
        self.toasts
            .iter()
            .map(|toast| toast.expires_at_ms)
            .min()
            .map(|deadline| u64::try_from(deadline.saturating_sub(now_ms)).unwrap_or(0))
    }

    /// The toasts to draw, newest first, capped at [`MAX_VISIBLE_TOASTS`].
    #[must_use]
    pub fn visible(&self) -> Vec<ToastInfo> {
        self.toasts
            .iter()
            .take(MAX_VISIBLE_TOASTS)
            .map(|toast| ToastInfo {
                level: toast.notification.level,
                message: toast.notification.message.clone(),
                timestamp: format_clock(toast.raised_at_ms),
            })
            .collect()
    }
}

fn format_clock(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map_or_else(String::new, |time| time.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationLevel;

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut queue = ToastQueue::new(2000);
        queue.push(Notification::success("fetched"), 1_000);

        assert!(!queue.expire(2_999));
        assert_eq!(queue.visible().len(), 1);

        assert!(queue.expire(3_000));
        assert!(queue.is_empty());
    }

    #[test]
    fn newest_toast_is_first_and_stack_is_capped() {
        let mut queue = ToastQueue::default();
        for (i, message) in ["one", "two", "three", "four"].into_iter().enumerate() {
            queue.push(Notification::info(message), i64::try_from(i).unwrap());
        }

        let visible = queue.visible();
        assert_eq!(visible.len(), MAX_VISIBLE_TOASTS);
        assert_eq!(visible[0].message, "four");
        assert_eq!(visible[0].level, NotificationLevel::Info);
        assert_eq!(visible[2].message, "two");
    }

    #[test]
    fn next_deadline_tracks_oldest_toast() {
        let mut queue = ToastQueue::new(2000);
        assert_eq!(queue.next_deadline_ms(0), None);

        queue.push(Notification::error("boom"), 0);
        queue.push(Notification::info("later"), 500);

        assert_eq!(queue.next_deadline_ms(1_000), Some(1_000));
        assert_eq!(queue.next_deadline_ms(5_000), Some(0));
    }

    #[test]
    fn timestamp_is_formatted_as_clock() {
        let mut queue = ToastQueue::default();
        queue.push(Notification::info("tick"), 3_723_000);
        assert_eq!(queue.visible()[0].timestamp, "01:02:03");
    }
}
