pub mod error;
pub mod game_config;

pub use error::ConfigError;
pub use game_config::{CONFIG_FILE, GameConfig};
