use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Semantic color roles used by the sidebar and content panes.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Active route and icons of an expanded sidebar.
    pub accent_primary: Color,
    /// Chevrons and focus borders.
    pub accent_secondary: Color,

    /// Status line messages.
    pub info: Color,

    /// Row under the pointer.
    pub hover_bg: Color,
    /// Notification badge fill.
    pub badge_bg: Color,
    pub badge_fg: Color,
}

/// Theme trait exposes semantic roles and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().accent_secondary } else { self.roles().border };
        Style::default().fg(color)
    }

    fn hover_style(&self) -> Style {
        Style::default().bg(self.roles().hover_bg)
    }

    fn status_info(&self) -> Style {
        Style::default().fg(self.roles().info)
    }

    fn accent_primary_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary)
    }
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }
}
