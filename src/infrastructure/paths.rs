//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Returns the plugin's data directory, `/host/.local/share/zellij/imagefinder`.
///
/// `/host` maps to the cwd of the last focused terminal (usually the user's
/// home), so on the host this is normally `~/.local/share/zellij/imagefinder`.
/// Only the trace file lives here; the plugin keeps no other state on disk.
///
/// # Examples
///
/// ```
/// use imagefinder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str().unwrap(), "/host/.local/share/zellij/imagefinder");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("imagefinder")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// Used for user-supplied paths such as `theme_file`.
///
/// # Examples
///
/// ```
/// use imagefinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
