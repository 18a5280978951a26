//! Keyboard binding
//!
//! Maps keys to session commands. Space starts, restarts or jumps depending
//! on the phase; Escape toggles pause.

use crate::session::Command;
use crate::sim::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Other,
}

impl Key {
    /// From a DOM `KeyboardEvent.code` / `key` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" | " " => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

pub fn bind(key: Key, phase: GamePhase) -> Option<Command> {
    match (key, phase) {
        (Key::Space, GamePhase::NotStarted) => Some(Command::Start),
        (Key::Space, GamePhase::Over) => Some(Command::Reset),
        (Key::Space, GamePhase::Running | GamePhase::Paused) => Some(Command::Jump),
        (Key::Escape, _) => Some(Command::TogglePause),
        (Key::Other, _) => None,
    }
}
