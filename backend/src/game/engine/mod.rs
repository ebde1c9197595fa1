pub mod active_game;
pub mod game_code;
pub mod registry;

pub use registry::{GameConfig, SessionRegistry};
