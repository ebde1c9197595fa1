pub mod core;
pub mod engine;
mod ws;
mod ws_handler;

pub use core::messages;
pub use core::{Dictionary, WordList, WordRepository};
pub use engine::{GameConfig, SessionRegistry};
pub use ws_handler::handle_connection;
