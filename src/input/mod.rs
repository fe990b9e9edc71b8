pub mod keyboard;
pub mod scripted;

pub use keyboard::{KeyBindings, KeyboardInput, key_from_name};
pub use scripted::ScriptedInput;
