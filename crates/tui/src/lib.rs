//! # Sidenav TUI
//!
//! Terminal host for the navigation sidebar. The sidebar sits on the left of
//! the screen and is driven by the mouse: hovering the icon-only rail opens a
//! flyout, clicking a branch in the expanded sidebar opens it inline and
//! clicking a link or action executes its effects. The content pane on the
//! right shows the current location and a history that stands in for a router.
//!
//! Keys: `s` switches between expanded and icon-only mode, `Backspace` goes
//! back, `q` or `Esc` quits.

mod app;
mod ui;

use anyhow::Result;
use sidenav_engine::SidebarState;

pub use ui::theme::THEME_ENV;

/// Runs the TUI until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be put into raw mode, the alternate screen
/// cannot be entered, or drawing fails.
pub async fn run(sidebar: SidebarState) -> Result<()> {
    ui::runtime::run_app(sidebar).await
}
