//! Runtime: terminal lifecycle and the event loop of the TUI.
//!
//! A dedicated blocking task reads `crossterm` events and forwards them over a
//! Tokio channel. The loop routes them to [`MainView`], executes the returned
//! [`Effect`]s through [`App`] and redraws only when `App` marks itself dirty.
//! Pointer moves are throttled to one every 16 ms.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use sidenav_engine::SidebarState;
use sidenav_types::Effect;
use tokio::{signal, sync::mpsc};
use tracing::{info, warn};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

const MOUSE_MOVE_INTERVAL: Duration = Duration::from_millis(16);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spawn a blocking task that reads terminal input and forwards it over a
/// channel. The task ends when the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::task::spawn_blocking(move || {
        let mut last_mouse_move: Option<Instant> = None;
        loop {
            if sender.is_closed() {
                break;
            }
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    warn!("Failed to poll terminal input: {error}");
                    break;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(error) => {
                    warn!("Failed to read event: {error}");
                    break;
                }
            };

            let is_mouse_move = event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved);
            if is_mouse_move {
                if last_mouse_move.is_some_and(|last| last.elapsed() < MOUSE_MOVE_INTERVAL) {
                    continue;
                }
                last_mouse_move = Some(Instant::now());
            }
            if sender.blocking_send(event).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode, enter the alternate screen and capture the
/// mouse.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).context("failed to leave the alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal
        .draw(|frame| main_view.render(frame, frame.area(), app))
        .context("failed to draw the sidebar")?;
    Ok(())
}

/// Routes one input event to the view.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.is_press() => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(..) => {
            app.mark_dirty();
            Vec::new()
        }
        Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    loop {
        if app.take_dirty() {
            render(terminal, app, main_view)?;
        }
        if app.should_quit {
            break;
        }
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                let effects = handle_input_event(app, main_view, event);
                app.apply_effects(effects);
            }
            _ = signal::ctrl_c() => break,
        }
    }
    Ok(())
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event loop
/// and restores the terminal even when the loop fails.
pub async fn run_app(sidebar: SidebarState) -> Result<()> {
    let mut app = App::new(sidebar, theme::load_from_env());
    let mut main_view = MainView::new();

    let mut terminal = setup_terminal()?;
    info!(mode = ?app.sidebar.mode(), location = %app.sidebar.current_path(), "sidebar TUI started");
    let outcome = event_loop(&mut terminal, &mut app, &mut main_view).await;
    cleanup_terminal(&mut terminal)?;
    info!(location = %app.sidebar.current_path(), "sidebar TUI stopped");
    outcome
}
