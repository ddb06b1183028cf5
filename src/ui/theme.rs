//! Theme management and ANSI escape sequence generation.
//!
//! Color schemes come from built-in themes (Catppuccin variants) or custom TOML
//! files, and are turned into 24-bit ANSI escape sequences at render time.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#313244"          # optional
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! card_label_fg = "#a6adc8"
//! status_ok_fg = "#a6e3a1"
//! status_low_fg = "#f9e2af"
//! status_depleted_fg = "#f38ba8"
//! alert_success_fg = "#1e1e2e"
//! alert_success_bg = "#a6e3a1"
//! alert_error_fg = "#1e1e2e"
//! alert_error_bg = "#f38ba8"
//! modal_border = "#89b4fa"
//! modal_bg = "#181825"           # optional
//! focused_field_fg = "#f5c2e7"
//! disabled_fg = "#45475a"
//! ```
//!
//! # Example
//!
//! ```rust
//! use stockboard::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::app::alert::AlertKind;
use crate::domain::{StockStatus, StockboardError};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty table placeholder and loading indicator color.
    pub empty_state_fg: String,

    /// Dashboard card labels.
    pub card_label_fg: String,

    /// Stock status colors: `OK`, `BAIXO`, anything else.
    pub status_ok_fg: String,
    pub status_low_fg: String,
    pub status_depleted_fg: String,

    pub alert_success_fg: String,
    pub alert_success_bg: String,
    pub alert_error_fg: String,
    pub alert_error_bg: String,

    pub modal_border: String,
    #[serde(default)]
    pub modal_bg: Option<String>,
    /// Label of the form field being edited.
    pub focused_field_fg: String,

    /// Disabled pagination controls.
    pub disabled_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    ///
    /// # Example
    ///
    /// ```rust
    /// use stockboard::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StockboardError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StockboardError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| StockboardError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Foreground color for a stock status.
    #[must_use]
    pub fn status_color(&self, status: StockStatus) -> &str {
        match status {
            StockStatus::Ok => &self.colors.status_ok_fg,
            StockStatus::Low => &self.colors.status_low_fg,
            StockStatus::Depleted => &self.colors.status_depleted_fg,
        }
    }

    /// `(foreground, background)` of the alert banner.
    #[must_use]
    pub fn alert_colors(&self, kind: AlertKind) -> (&str, &str) {
        match kind {
            AlertKind::Success => (&self.colors.alert_success_fg, &self.colors.alert_success_bg),
            AlertKind::Error => (&self.colors.alert_error_fg, &self.colors.alert_error_bg),
        }
    }

    /// Converts a hex color to an RGB tuple. Returns white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stockboard::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI reset escape sequence, clearing all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Palette used if the embedded default theme ever fails to parse.
    fn plain() -> Self {
        let white = || "#ffffff".to_string();
        let black = || "#000000".to_string();
        let grey = || "#808080".to_string();
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                selection_fg: black(),
                selection_bg: white(),
                text_normal: white(),
                text_dim: grey(),
                border: grey(),
                search_bar_border: white(),
                match_highlight_fg: black(),
                match_highlight_bg: "#ffff00".to_string(),
                empty_state_fg: white(),
                card_label_fg: grey(),
                status_ok_fg: "#00ff00".to_string(),
                status_low_fg: "#ffff00".to_string(),
                status_depleted_fg: "#ff0000".to_string(),
                alert_success_fg: black(),
                alert_success_bg: "#00ff00".to_string(),
                alert_error_fg: white(),
                alert_error_bg: "#ff0000".to_string(),
                modal_border: white(),
                modal_bg: None,
                focused_field_fg: "#ffff00".to_string(),
                disabled_fg: grey(),
            },
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!("built-in theme failed to parse, using plain palette");
            Self::plain()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        assert!(Theme::from_name("catppuccin-latte").is_some());
    }

    #[test]
    fn status_colors_are_distinct() {
        let theme = Theme::default();

        let ok = theme.status_color(StockStatus::Ok);
        let low = theme.status_color(StockStatus::Low);
        let gone = theme.status_color(StockStatus::Depleted);

        assert_ne!(ok, low);
        assert_ne!(low, gone);
        assert_ne!(ok, gone);
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = toml::to_string(&Theme::plain()).unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();

        assert_eq!(theme, Theme::plain());
    }

    #[test]
    fn broken_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();

        assert!(matches!(err, StockboardError::Theme(_)));
    }

    #[test]
    fn invalid_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("oops"), "\u{1b}[38;2;255;255;255m");
    }
}
