//! Sandbox path helpers.

use std::path::PathBuf;

/// Data directory for the plugin's trace files.
///
/// Resolves to `/host/.local/share/zellij/stockboard` inside the sandbox, which
/// is `~/.local/share/zellij/stockboard` when Zellij was started from the home
/// directory.
///
/// # Examples
///
/// ```
/// use stockboard::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/stockboard"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("stockboard")
}

/// Maps `~` and `~/…` to the sandbox's `/host` mount, leaving other paths alone.
///
/// Used for the `theme_file` option, which users naturally write relative to home.
///
/// # Examples
///
/// ```
/// use stockboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/estoque.toml"), "/host/themes/estoque.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
