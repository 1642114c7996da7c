//! Theme styling module for the TUI UI layer.
//!
//! Two palettes ship with the tutorial (Dracula and Nord), described through
//! semantic roles, plus helper builders for Ratatui widgets. Prefer these
//! helpers over hard-coding colors.

use tracing::{debug, warn};

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Names accepted by [`load`].
pub const THEME_NAMES: [&str; 2] = ["dracula", "nord"];

/// Resolve a theme by name, falling back to Dracula.
pub fn load(preferred_theme: Option<&str>) -> Box<dyn Theme> {
    let Some(name) = preferred_theme.map(str::trim).filter(|name| !name.is_empty()) else {
        return Box::new(DraculaTheme::new());
    };
    match resolve(name) {
        Some(theme) => {
            debug!(theme = theme.name(), "theme selected");
            theme
        }
        None => {
            warn!(theme = %name, known = ?THEME_NAMES, "Unknown theme; using dracula");
            Box::new(DraculaTheme::new())
        }
    }
}

fn resolve(name: &str) -> Option<Box<dyn Theme>> {
    match name.to_ascii_lowercase().as_str() {
        "dracula" => Some(Box::new(DraculaTheme::new())),
        "nord" => Some(Box::new(NordTheme::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_case_insensitively() {
        assert_eq!(load(Some("Nord")).name(), "nord");
        assert_eq!(load(Some(" dracula ")).name(), "dracula");
    }

    #[test]
    fn unknown_or_missing_names_fall_back() {
        assert_eq!(load(Some("solarized")).name(), "dracula");
        assert_eq!(load(Some("")).name(), "dracula");
        assert_eq!(load(None).name(), "dracula");
    }
}
