//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, View};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Re-run every collector now, regardless of its cadence.
    RefreshAll,
    /// The view changed; its collector should run immediately.
    ViewChanged,
}

/// Handles a key press.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    // Help popup swallows everything except its own toggles.
    if state.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.show_help = false,
            _ => {}
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Esc => {
            if state.view == View::Dashboard {
                KeyAction::Quit
            } else {
                state.view = View::Dashboard;
                KeyAction::ViewChanged
            }
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            KeyAction::None
        }
        KeyCode::Char('r') => KeyAction::RefreshAll,
        KeyCode::Char('p') => {
            state.paused = !state.paused;
            KeyAction::None
        }
        KeyCode::Char('v') => {
            state.toggle_view(View::Diff);
            KeyAction::ViewChanged
        }
        KeyCode::Char('h') => {
            state.toggle_view(View::Heatmap);
            KeyAction::ViewChanged
        }
        KeyCode::Char('d') => {
            if state.view == View::Dashboard {
                return KeyAction::None;
            }
            state.view = View::Dashboard;
            KeyAction::ViewChanged
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            KeyAction::None
        }
        KeyCode::PageDown | KeyCode::Char('J') => {
            state.scroll_diff(true);
            KeyAction::None
        }
        KeyCode::PageUp | KeyCode::Char('K') => {
            state.scroll_diff(false);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
