//! Input handling and keybindings

use crate::app::App;
use crate::prompt::{AfterSave, PromptKind};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gv_core::{Direction, Motion};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key event
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<Action> {
    // Clear status message on any keystroke (except pure modifiers)
    if !matches!(key.code, KeyCode::Modifier(_)) {
        app.clear_status_message();
    }

    // Help overlay - any key closes it
    if app.show_help {
        app.toggle_help();
        return Ok(Action::Continue);
    }

    if app.prompt.is_some() {
        handle_prompt_input(app, key);
    } else {
        handle_editor_input(app, key);
    }

    if app.should_quit {
        Ok(Action::Quit)
    } else {
        Ok(Action::Continue)
    }
}

fn handle_prompt_input(app: &mut App, key: KeyEvent) {
    let Some(prompt) = app.prompt.as_mut() else {
        return;
    };

    // Yes/no questions answer on a single key
    if matches!(prompt.kind, PromptKind::SaveFirst(_)) {
        if let KeyCode::Char(c) = key.code {
            if matches!(c, 'y' | 'Y' | 'n' | 'N') {
                prompt.insert(c);
                app.submit_prompt();
                return;
            }
        }
    }

    match key {
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => app.submit_prompt(),
        KeyEvent {
            code: KeyCode::Esc, ..
        } => app.cancel_prompt(),
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => prompt.backspace(),
        KeyEvent {
            code: KeyCode::Delete,
            ..
        } => prompt.delete(),
        KeyEvent {
            code: KeyCode::Left,
            ..
        } => prompt.left(),
        KeyEvent {
            code: KeyCode::Right,
            ..
        } => prompt.right(),
        KeyEvent {
            code: KeyCode::Home,
            ..
        } => prompt.home(),
        KeyEvent {
            code: KeyCode::End, ..
        } => prompt.end(),
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers,
            ..
        } if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            prompt.insert(c)
        }
        _ => {}
    }
}

fn handle_editor_input(app: &mut App, key: KeyEvent) {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let session = &mut app.session;

    match key.code {
        // Ctrl+Up/Down collapse and expand, Shift extends the selection
        KeyCode::Up if ctrl => session.collapse_current(),
        KeyCode::Down if ctrl => session.expand_current(),
        KeyCode::Up => session.move_cursor(Motion::Up, shift),
        KeyCode::Down => session.move_cursor(Motion::Down, shift),
        KeyCode::Left => session.move_cursor(Motion::Left, shift),
        KeyCode::Right => session.move_cursor(Motion::Right, shift),
        KeyCode::Home => session.move_cursor(Motion::Home, shift),
        KeyCode::End => session.move_cursor(Motion::End, shift),
        KeyCode::PageUp => session.move_cursor(Motion::PageUp, false),
        KeyCode::PageDown => session.move_cursor(Motion::PageDown, false),

        KeyCode::Enter => session.split_at_cursor(),
        KeyCode::Backspace => session.backspace(),
        KeyCode::Delete if ctrl => session.delete_current_headline(),
        KeyCode::Delete => session.delete_forward(),
        KeyCode::Tab => {
            session.promote();
        }
        KeyCode::BackTab => {
            session.demote();
        }
        KeyCode::Esc => session.clear_selection(),
        KeyCode::F(1) => app.toggle_help(),

        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'q' => app.request_quit(),
            's' => app.request_save(AfterSave::Nothing),
            't' => app.request_title(),
            'n' => app.request_new_outline(),
            'b' => app.session.toggle_bullets(),
            'l' => app.session.toggle_multi_list(),
            'c' => app.copy(),
            'x' => app.cut(),
            'v' => app.paste(),
            _ => {}
        },
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => session.insert_char(c),
        _ => {}
    }
}
