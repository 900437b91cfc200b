//! Key mapping
//!
//! Turns crossterm key events into controller events, depending on which
//! screen is showing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{GameEvent, GamePhase};

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(GameEvent),
    ScrollUp,
    ScrollDown,
    Quit,
}

pub fn map_key(phase: GamePhase, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Some(Action::Quit);
    }

    match phase {
        GamePhase::NotStarted => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Game(GameEvent::Start)),
            _ => None,
        },
        GamePhase::InProgress => match key.code {
            KeyCode::Char(c) => c
                .to_digit(10)
                .map(|d| Action::Game(GameEvent::Digit(d as u8))),
            KeyCode::Backspace | KeyCode::Delete => Some(Action::Game(GameEvent::Backspace)),
            _ => None,
        },
        GamePhase::Finished => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Game(GameEvent::Restart)),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            _ => None,
        },
    }
}
