use futures_util::future::{self, BoxFuture};
use std::collections::HashSet;
use std::path::Path;

/// Word-membership lookup used as the last validation step.
///
/// Implementations may be remote, so the lookup is async. Words are passed in
/// already normalized (trimmed, lowercase).
pub trait Dictionary: Send + Sync + 'static {
    fn contains<'a>(&'a self, word: &'a str) -> BoxFuture<'a, bool>;
}

/// In-memory dictionary backed by a hash set
#[derive(Debug, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline-separated word list. Blank lines and `#` comments are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::new(
            contents.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains<'a>(&'a self, word: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(future::ready(self.words.contains(word)))
    }
}
