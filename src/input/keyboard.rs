use macroquad::prelude::{KeyCode, is_key_pressed};

use crate::config::ConfigError;
use crate::traits::input::{InputProvider, KeyPress};

/// Lane index to key code, in lane order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    keys: Vec<KeyCode>,
}

impl KeyBindings {
    /// Resolve configured key names. Fails on the first unknown name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let keys = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                key_from_name(name).ok_or_else(|| ConfigError::UnknownKey(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }
}

/// Keyboard input using macroquad. Reports key-down edges only.
pub struct KeyboardInput {
    bindings: KeyBindings,
}

impl KeyboardInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }
}

impl InputProvider for KeyboardInput {
    fn poll_presses(&mut self, now_us: i64) -> Vec<KeyPress> {
        self.bindings
            .keys
            .iter()
            .enumerate()
            .filter(|&(_, &key)| is_key_pressed(key))
            .map(|(lane, _)| KeyPress {
                lane,
                time_us: now_us,
            })
            .collect()
    }
}

/// Convert a configured key name to a KeyCode.
pub fn key_from_name(s: &str) -> Option<KeyCode> {
    match s {
        "Space" => Some(KeyCode::Space),
        "Apostrophe" => Some(KeyCode::Apostrophe),
        "Comma" => Some(KeyCode::Comma),
        "Minus" => Some(KeyCode::Minus),
        "Period" => Some(KeyCode::Period),
        "Slash" => Some(KeyCode::Slash),
        "Semicolon" => Some(KeyCode::Semicolon),
        "Equal" => Some(KeyCode::Equal),
        "LeftBracket" => Some(KeyCode::LeftBracket),
        "Backslash" => Some(KeyCode::Backslash),
        "RightBracket" => Some(KeyCode::RightBracket),
        "Key0" => Some(KeyCode::Key0),
        "Key1" => Some(KeyCode::Key1),
        "Key2" => Some(KeyCode::Key2),
        "Key3" => Some(KeyCode::Key3),
        "Key4" => Some(KeyCode::Key4),
        "Key5" => Some(KeyCode::Key5),
        "Key6" => Some(KeyCode::Key6),
        "Key7" => Some(KeyCode::Key7),
        "Key8" => Some(KeyCode::Key8),
        "Key9" => Some(KeyCode::Key9),
        "A" => Some(KeyCode::A),
        "B" => Some(KeyCode::B),
        "C" => Some(KeyCode::C),
        "D" => Some(KeyCode::D),
        "E" => Some(KeyCode::E),
        "F" => Some(KeyCode::F),
        "G" => Some(KeyCode::G),
        "H" => Some(KeyCode::H),
        "I" => Some(KeyCode::I),
        "J" => Some(KeyCode::J),
        "K" => Some(KeyCode::K),
        "L" => Some(KeyCode::L),
        "M" => Some(KeyCode::M),
        "N" => Some(KeyCode::N),
        "O" => Some(KeyCode::O),
        "P" => Some(KeyCode::P),
        "Q" => Some(KeyCode::Q),
        "R" => Some(KeyCode::R),
        "S" => Some(KeyCode::S),
        "T" => Some(KeyCode::T),
        "U" => Some(KeyCode::U),
        "V" => Some(KeyCode::V),
        "W" => Some(KeyCode::W),
        "X" => Some(KeyCode::X),
        "Y" => Some(KeyCode::Y),
        "Z" => Some(KeyCode::Z),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Enter" => Some(KeyCode::Enter),
        "Tab" => Some(KeyCode::Tab),
        "LeftShift" => Some(KeyCode::LeftShift),
        "RightShift" => Some(KeyCode::RightShift),
        "LeftControl" => Some(KeyCode::LeftControl),
        "RightControl" => Some(KeyCode::RightControl),
        "Kp0" => Some(KeyCode::Kp0),
        "Kp1" => Some(KeyCode::Kp1),
        "Kp2" => Some(KeyCode::Kp2),
        "Kp3" => Some(KeyCode::Kp3),
        "Kp4" => Some(KeyCode::Kp4),
        "Kp5" => Some(KeyCode::Kp5),
        "Kp6" => Some(KeyCode::Kp6),
        "Kp7" => Some(KeyCode::Kp7),
        "Kp8" => Some(KeyCode::Kp8),
        "Kp9" => Some(KeyCode::Kp9),
        "F1" => Some(KeyCode::F1),
        "F2" => Some(KeyCode::F2),
        "F3" => Some(KeyCode::F3),
        "F4" => Some(KeyCode::F4),
        "F5" => Some(KeyCode::F5),
        "F6" => Some(KeyCode::F6),
        "F7" => Some(KeyCode::F7),
        "F8" => Some(KeyCode::F8),
        "F9" => Some(KeyCode::F9),
        "F10" => Some(KeyCode::F10),
        "F11" => Some(KeyCode::F11),
        "F12" => Some(KeyCode::F12),
        _ => None,
    }
}
