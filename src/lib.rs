//! Image Finder: a Zellij plugin for searching an online image catalog.
//!
//! The plugin provides:
//! - Query submission against the Pixabay search API
//! - Paginated results (12 per page) with an explicit "load more"
//! - A full-size preview overlay for the selected image
//! - Auto-dismissing toast notifications and an inline error line
//! - Query-match highlighting in the tags column

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, timers, toast queue    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search/pagination controller                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────────────┐   ┌───────────────────────────┐
//! │ UI Layer (ui/)        │   │ Search Layer (search/)    │
//! │ - Rendering           │   │ - Request tags & URLs     │
//! │ - Theming             │   │ - Response decoding       │
//! │ - Toasts              │   │                           │
//! └───────────────────────┘   └───────────────────────────┘
//!         │                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types, images, notifications (domain/)     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/imagefinder.wasm" {
//!         api_key "your-pixabay-key"
//!         image_type "photo"
//!         orientation "horizontal"
//!         safesearch "true"
//!         discard_stale_responses "true"
//!         toast_duration_ms "2000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use imagefinder::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     api_key: Some("key".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit { term: "cats".to_string() })?;
//! assert!(matches!(&actions[..], [Action::Fetch(request)] if request.tag.page == 1));
//! # Ok::<(), imagefinder::ImageFinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{ImageFinderError, ImageItem, Notification, Result, SearchError, SearchPage};
pub use search::SearchApi;
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default search endpoint.
pub const DEFAULT_API_URL: &str = "https://pixabay.com/api/";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pixabay API key. Searches fail until it is set.
    pub api_key: Option<String>,

    /// Search endpoint. Default: [`DEFAULT_API_URL`]
    pub api_url: String,

    /// `photo`, `illustration`, `vector` or `all`. Default: `"photo"`
    pub image_type: String,

    /// `horizontal`, `vertical` or `all`. Default: `"horizontal"`
    pub orientation: String,

    /// Default: `true`
    pub safesearch: bool,

    /// Apply only the response to the latest request. Default: `true`
    pub discard_stale_responses: bool,

    /// How long a toast stays on screen. Default: 2000
    pub toast_duration_ms: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
            discard_stale_responses: true,
            toast_duration_ms: ui::toasts::DEFAULT_TOAST_DURATION_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their
    /// defaults. Booleans accept `true`/`false`/`yes`/`no`/`1`/`0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use imagefinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "secret".to_string());
    /// map.insert("safesearch".to_string(), "false".to_string());
    /// map.insert("toast_duration_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("secret"));
    /// assert!(!config.safesearch);
    /// assert_eq!(config.toast_duration_ms, 2000);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let flag = |key: &str, default: bool| text(key).and_then(|value| parse_bool(&value)).unwrap_or(default);

        Self {
            api_key: text("api_key"),
            api_url: text("api_url").unwrap_or(defaults.api_url),
            image_type: text("image_type").unwrap_or(defaults.image_type),
            orientation: text("orientation").unwrap_or(defaults.orientation),
            safesearch: flag("safesearch", defaults.safesearch),
            discard_stale_responses: flag("discard_stale_responses", defaults.discard_stale_responses),
            toast_duration_ms: text("toast_duration_ms")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.toast_duration_ms),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Checks that searches can run with this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::Config`] when `api_key` is missing.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(ImageFinderError::Config(
                "api_key is not set in the plugin configuration".to_string(),
            ));
        }
        Ok(())
    }

    /// Endpoint parameters for building request URLs.
    #[must_use]
    pub fn search_api(&self) -> SearchApi {
        SearchApi {
            base_url: self.api_url.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            image_type: self.image_type.clone(),
            orientation: self.orientation.clone(),
            safesearch: self.safesearch,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Creates the initial `AppState` for `config`.
///
/// Loads the theme (file, then name, then the default) and copies the
/// stale-response policy. A configuration that fails [`Config::validate`] is
/// not fatal: its message becomes the inline error so the user sees why
/// searches will fail.
///
/// # Example
///
/// ```rust
/// use imagefinder::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.search.error_message.unwrap().contains("api_key"));
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing image finder plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(theme);
    state.discard_stale_responses = config.discard_stale_responses;

    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "invalid configuration");
        state.search.error_message = Some(e.to_string());
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_type, "photo");
        assert_eq!(config.orientation, "horizontal");
        assert!(config.safesearch);
        assert!(config.discard_stale_responses);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = Config::from_zellij(&map(&[("api_key", "   ")]));
        assert!(matches!(config.validate(), Err(ImageFinderError::Config(_))));
    }

    #[test]
    fn parses_flags_and_numbers() {
        let config = Config::from_zellij(&map(&[
            ("discard_stale_responses", "no"),
            ("safesearch", "maybe"),
            ("toast_duration_ms", "3500"),
            ("theme", "catppuccin-latte"),
        ]));
        assert!(!config.discard_stale_responses);
        assert!(config.safesearch);
        assert_eq!(config.toast_duration_ms, 3500);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn search_api_carries_endpoint_settings() {
        let config = Config::from_zellij(&map(&[("api_key", "k"), ("orientation", "vertical")]));
        let api = config.search_api();
        assert_eq!(api.api_key, "k");
        assert_eq!(api.orientation, "vertical");
        assert_eq!(api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn initialize_applies_theme_and_policy() {
        let config = Config {
            api_key: Some("k".to_string()),
            theme_name: Some("catppuccin-frappe".to_string()),
            discard_stale_responses: false,
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-frappe");
        assert!(!state.discard_stale_responses);
        assert!(state.search.error_message.is_none());
    }

    #[test]
    fn initialize_falls_back_on_bad_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a theme").unwrap();

        let config = Config {
            api_key: Some("k".to_string()),
            theme_file: Some(file.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme.name, "catppuccin-mocha");
    }
}
