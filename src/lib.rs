pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod library;
pub mod model;
pub mod render;
pub mod score;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;
