//! Word validation
//!
//! Rules are checked in a fixed order and the first failure wins:
//! 1. Length >= 3
//! 2. Not on the common-word ban-list
//! 3. Formable from the round's letters (with multiplicity)
//! 4. Not already submitted by this player this round
//! 5. Present in the dictionary (looked up by the caller once 1-4 pass)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MIN_WORD_LENGTH: usize = 3;

pub const COMMON_WORDS: [&str; 10] = [
    "the", "and", "for", "you", "are", "with", "was", "not", "but", "from",
];

/// Why a submission was refused. `Display` is the text shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    #[error("Word must be at least 3 letters long.")]
    TooShort,
    #[error("That is a common word.")]
    TooCommon,
    #[error("Word contains unavailable letters.")]
    UnavailableLetters,
    #[error("You already submitted that word.")]
    Duplicate,
    #[error("That is not a valid word.")]
    NotAWord,
}

impl Rejection {
    /// Message for the submitter, naming the word where that helps
    pub fn message_for(&self, word: &str) -> String {
        match self {
            Rejection::NotAWord => format!("'{}' is not a valid word.", word.to_uppercase()),
            other => other.to_string(),
        }
    }
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True if every letter of `word` is available in `letters`, each pool letter
/// usable once. Case-insensitive.
pub fn can_form(word: &str, letters: &[char]) -> bool {
    let mut available: HashMap<char, usize> = HashMap::new();
    for letter in letters {
        *available.entry(letter.to_ascii_uppercase()).or_default() += 1;
    }

    word.chars().all(|c| match available.get_mut(&c.to_ascii_uppercase()) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}

/// Run every rule except the dictionary lookup. Returns the normalized word.
pub fn check_word(raw: &str, letters: &[char], submitted: &[String]) -> Result<String, Rejection> {
    let word = normalize(raw);

    if word.chars().count() < MIN_WORD_LENGTH {
        return Err(Rejection::TooShort);
    }
    if COMMON_WORDS.contains(&word.as_str()) {
        return Err(Rejection::TooCommon);
    }
    if !can_form(&word, letters) {
        return Err(Rejection::UnavailableLetters);
    }
    if submitted.contains(&word) {
        return Err(Rejection::Duplicate);
    }

    Ok(word)
}
