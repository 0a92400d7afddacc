//! Theme styling for the TUI.
//!
//! Palettes map onto semantic [`ThemeRoles`]; components only use the roles and
//! the helpers in [`theme_helpers`], never raw colors.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment variable selecting the palette (`dracula` or `nord`).
pub const THEME_ENV: &str = "TUI_THEME";

/// Resolves a palette by name, case-insensitively.
pub fn resolve(name: &str) -> Option<Box<dyn Theme>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "dracula" => Some(Box::new(DraculaTheme::new())),
        "nord" => Some(Box::new(NordTheme::new())),
        _ => None,
    }
}

/// Selects the palette from `TUI_THEME`, defaulting to Dracula.
pub fn load_from_env() -> Box<dyn Theme> {
    if let Ok(name) = env::var(THEME_ENV) {
        if let Some(theme) = resolve(&name) {
            return theme;
        }
        debug!(theme = %name, "Unknown theme requested; falling back to dracula");
    }
    Box::new(DraculaTheme::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_palettes_case_insensitively() {
        assert!(resolve("Nord").is_some());
        assert!(resolve(" dracula ").is_some());
        assert!(resolve("solarized").is_none());
    }
}
