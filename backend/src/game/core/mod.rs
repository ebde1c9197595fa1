pub mod dictionary;
pub mod letters;
pub mod messages;
pub mod player;
pub mod scoring;
pub mod session;
pub mod validation;
mod word_repository;

pub use dictionary::{Dictionary, WordList};
pub use word_repository::WordRepository;
