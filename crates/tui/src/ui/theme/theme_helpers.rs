use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the content pane behind the sidebar.
pub fn background_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Notification badge rendered as a filled pill, e.g. ` 3 `.
pub fn badge_span<'a, T: Theme + ?Sized>(theme: &T, count: i64) -> Span<'a> {
    let ThemeRoles { badge_bg, badge_fg, .. } = *theme.roles();
    Span::styled(
        format!(" {count} "),
        Style::default().bg(badge_bg).fg(badge_fg).add_modifier(Modifier::BOLD),
    )
}

/// Icon color: accent when the sidebar is expanded, the node is active, or the
/// pointer is over an icon-only rail; muted otherwise.
pub fn icon_style<T: Theme + ?Sized>(theme: &T, expanded: bool, active: bool, hovered: bool) -> Style {
    if active || expanded || hovered {
        theme.accent_primary_style()
    } else {
        theme.text_muted_style()
    }
}

/// Label style for a navigation row.
pub fn label_style<T: Theme + ?Sized>(theme: &T, active: bool) -> Style {
    if active {
        theme.accent_emphasis_style()
    } else {
        theme.text_primary_style()
    }
}

/// Row background; hover only paints in expanded mode, the icon-only rail
/// signals hover through the icon color instead.
pub fn row_style<T: Theme + ?Sized>(theme: &T, expanded: bool, hovered: bool) -> Style {
    if expanded && hovered {
        panel_style(theme).patch(theme.hover_style())
    } else {
        panel_style(theme)
    }
}

/// Key/description pairs for the hint bar, e.g. `[(" q", " Quit")]`.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}
