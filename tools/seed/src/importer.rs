use sqlx::SqlitePool;
use std::collections::BTreeSet;

/// Rows per INSERT statement
const BATCH_SIZE: usize = 500;

/// Statistics from an import operation
#[derive(Debug, Default, PartialEq)]
pub struct ImportStats {
    /// Number of distinct words that passed all filters
    pub filtered: usize,
    /// Number of rows actually inserted (words already present are ignored)
    pub inserted: usize,
    /// Number of entries skipped (too short, non-alphabetic, duplicate)
    pub skipped: usize,
}

/// Normalise raw entries into the words the game can accept.
///
/// Entries are lowercased and kept only when they are purely ASCII alphabetic
/// and at least `min_length` letters long. Duplicates collapse to one word.
/// The result is sorted, so `limit` keeps a stable prefix.
pub fn prepare_words(
    entries: impl IntoIterator<Item = String>,
    min_length: usize,
    limit: Option<usize>,
) -> (Vec<String>, ImportStats) {
    let mut stats = ImportStats::default();
    let mut words = BTreeSet::new();

    for entry in entries {
        let word = entry.trim().to_lowercase();
        let usable = word.len() >= min_length && word.chars().all(|c| c.is_ascii_alphabetic());
        if !usable || !words.insert(word) {
            stats.skipped += 1;
        }
    }

    let mut words: Vec<String> = words.into_iter().collect();
    if let Some(limit) = limit {
        words.truncate(limit);
    }
    stats.filtered = words.len();

    (words, stats)
}

/// Insert words into the database in batches.
/// Uses INSERT OR IGNORE so re-seeding an existing database is harmless.
pub async fn import_words(
    pool: &SqlitePool,
    words: &[String],
    stats: &mut ImportStats,
) -> Result<(), sqlx::Error> {
    for chunk in words.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?)"; chunk.len()].join(", ");
        let query = format!("INSERT OR IGNORE INTO words (word) VALUES {placeholders}");

        let mut q = sqlx::query(&query);
        for word in chunk {
            q = q.bind(word);
        }

        let result = q.execute(pool).await?;
        stats.inserted += result.rows_affected() as usize;
    }

    Ok(())
}
