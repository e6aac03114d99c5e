//! Keybindings and mouse hit-testing.
//!
//! Popup closed: Enter/c open, q/Esc quit. Popup open: Enter send, Esc close,
//! Ctrl+O toggle, Ctrl+L clear input, PgUp/PgDn and Up/Down scroll the log.
//! Ctrl+C always quits. Left click on the button toggles, on the close
//! control closes, on the send control sends.

use crate::actions::Action;
use crate::ui::WidgetLayout;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent, popup_open: bool) -> Option<Action> {
    // Press and Repeat only; Release would double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);
    let ctrl = mods.contains(KeyModifiers::CONTROL);

    if code == KeyCode::Char('c') && ctrl {
        return Some(Action::Quit);
    }
    if code == KeyCode::Char('o') && ctrl {
        return Some(Action::TogglePopup);
    }

    if !popup_open {
        return match code {
            KeyCode::Enter | KeyCode::Char('c') => Some(Action::TogglePopup),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
    }

    if code == KeyCode::Char('l') && ctrl {
        return Some(Action::ClearInput);
    }

    match code {
        KeyCode::Esc => Some(Action::ClosePopup),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown => Some(Action::ScrollPageDown),
        // Alt is allowed for accented chars; Ctrl/Super are not text.
        KeyCode::Char(c) if !ctrl && !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
        _ => None,
    }
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

pub fn mouse_to_action(event: &MouseEvent, layout: &WidgetLayout, popup_open: bool) -> Option<Action> {
    let (col, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if hit(layout.button, col, row) {
                return Some(Action::TogglePopup);
            }
            if !popup_open {
                return None;
            }
            if hit(layout.close, col, row) {
                Some(Action::ClosePopup)
            } else if hit(layout.send, col, row) {
                Some(Action::Submit)
            } else {
                None
            }
        }
        MouseEventKind::ScrollUp if popup_open && hit(layout.messages, col, row) => Some(Action::ScrollUp),
        MouseEventKind::ScrollDown if popup_open && hit(layout.messages, col, row) => {
            Some(Action::ScrollDown)
        }
        _ => None,
    }
}
