//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the library and the Zellij plugin API. It
//! owns the three things the library deliberately does not: the HTTP
//! transport (`web_request`), the toast queue with its timer, and the
//! mapping from raw key presses to library events.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Update**: Map events, delegate to `handle_event`, execute actions
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → navigation, editing and preview events (see below)
//! - `WebRequestResult` with our context → `Event::FetchCompleted`
//! - `PermissionRequestResult(Denied)` → `Event::PermissionDenied`
//! - `Timer` → toast expiry (handled here, never reaches the library)
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Enter`: Open preview
//! - `/`: Edit query
//! - `m`/`Space`: Load more
//! - `q`: Close plugin
//!
//! While editing the query:
//! - characters, `Backspace`: Edit
//! - `Enter`: Search
//! - `Esc`: Cancel
//!
//! While the preview is open:
//! - `Esc`/`q`/`Enter`: Close preview

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use imagefinder::search::{decode_response, SearchApi, SearchRequest};
use imagefinder::ui::ToastQueue;
use imagefinder::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the runtime-owned pieces: endpoint
/// settings for building URLs and the toast queue.
struct State {
    /// Core application state from library layer.
    app: imagefinder::app::AppState,

    /// Endpoint parameters for `web_request`.
    api: SearchApi,

    /// Notifications raised by the controller, waiting to expire.
    toasts: ToastQueue,

    /// Whether a `set_timeout` is pending for toast expiry.
    timer_armed: bool,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: imagefinder::initialize(&default_config),
            api: default_config.search_api(),
            toasts: ToastQueue::new(default_config.toast_duration_ms),
            timer_armed: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Query the image search API
    /// - `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        imagefinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_url = %config.api_url,
            image_type = %config.image_type,
            orientation = %config.orientation,
            safesearch = config.safesearch,
            discard_stale_responses = config.discard_stale_responses,
            "parsed configuration"
        );
        self.app = imagefinder::initialize(&config);
        self.api = config.search_api();
        self.toasts = ToastQueue::new(config.toast_duration_ms);

        request_permission(&[PermissionType::WebAccess, PermissionType::ChangeApplicationState]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events, returning whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Re-parent this update under the span that issued the request.
        let _trace_guard = Self::remote_trace_context(&event).and_then(|request| {
            request.trace_context.as_ref().and_then(imagefinder::observability::TraceContext::attach)
        });

        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted");
                    return false;
                }
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => return self.expire_toasts(),
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                let toasted = actions.iter().any(|a| matches!(a, Action::Notify(_)));
                for a in actions {
                    self.execute_action(&a);
                }
                should_render || toasted
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        imagefinder::ui::render(&self.app, &self.toasts, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.preview.is_open {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::ClosePreview),
                _ => None,
            };
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        Some(match self.app.input_mode {
            InputMode::Editing => match key.bare_key {
                BareKey::Enter => Event::SubmitInput,
                BareKey::Esc => Event::CancelEdit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c)
                    if !key.has_modifiers(&[KeyModifier::Ctrl]) && !key.has_modifiers(&[KeyModifier::Alt]) =>
                {
                    Event::Char(c)
                }
                _ => return None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::EditQuery,
                BareKey::Char('m' | ' ') => Event::LoadMore,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// The request a `WebRequestResult` answers, if it is one of ours.
    fn remote_trace_context(event: &zellij_tile::prelude::Event) -> Option<SearchRequest> {
        match event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => SearchRequest::from_context(context),
            _ => None,
        }
    }

    /// Decodes a web request result into `FetchCompleted`.
    ///
    /// Results whose context was not produced by this plugin are ignored.
    fn map_web_request_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request) = SearchRequest::from_context(context) else {
            tracing::debug!("ignoring web request result without our context");
            return None;
        };

        let outcome = decode_response(status, body);
        tracing::debug!(
            request_id = request.tag.request_id,
            status,
            body_len = body.len(),
            ok = outcome.is_ok(),
            "search response received"
        );

        Some(Event::FetchCompleted {
            tag: request.tag,
            outcome,
        })
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Drops expired toasts and re-arms the timer for the next one.
    fn expire_toasts(&mut self) -> bool {
        self.timer_armed = false;
        let changed = self.toasts.expire(Self::now_ms());
        self.arm_toast_timer();
        changed
    }

    fn arm_toast_timer(&mut self) {
        if self.timer_armed {
            return;
        }
        if let Some(delay_ms) = self.toasts.next_deadline_ms(Self::now_ms()) {
            // Timer precision is coarse; never ask for less than 50ms.
            #[allow(clippy::cast_precision_loss)]
            let secs = delay_ms.max(50) as f64 / 1000.0;
            set_timeout(secs);
            self.timer_armed = true;
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `Fetch`: Issue a `web_request` tagged with the request context
    /// - `Notify`: Push a toast and arm the expiry timer
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                let url = self.api.url_for(&request.tag);
                tracing::debug!(
                    request_id = request.tag.request_id,
                    query = %request.tag.query,
                    page = request.tag.page,
                    "issuing web request"
                );
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], request.to_context());
            }
            Action::Notify(notification) => {
                self.toasts.push(notification.clone(), Self::now_ms());
                self.arm_toast_timer();
            }
        }
    }
}
