//! GV TUI - Terminal user interface components
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state (save / quit / new outline flows, clipboard)
//! - Event loop and keybindings
//! - Rendering (outline, status bar, prompt line, help overlay)
//! - Theme system

pub mod app;
pub mod input;
pub mod prompt;
pub mod terminal;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use log::debug;
use std::time::Duration;

// Re-export main types
pub use app::App;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    // Main event loop
    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        // Keep the layout in step with the terminal size
        let size = terminal.size().context("Failed to query terminal size")?;
        let (width, height) = ui::editor_viewport(size.width, size.height);
        app.session.set_viewport(width, height);

        // Draw UI
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        // Check if we should quit
        if app.should_quit {
            break;
        }

        // Poll for events with timeout
        if crossterm::event::poll(Duration::from_millis(250)).context("Failed to poll events")? {
            match crossterm::event::read().context("Failed to read event")? {
                // Only handle key press events, ignore release
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_input(app, key)? == input::Action::Quit {
                        debug!("Quit requested");
                    }
                }
                Event::Resize(width, height) => {
                    debug!("Terminal resized to {}x{}", width, height);
                }
                _ => {}
            }
        }
    }

    Ok(())
}
