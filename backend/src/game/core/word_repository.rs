use super::dictionary::Dictionary;
use futures_util::future::BoxFuture;
use sqlx::SqlitePool;
use tracing::warn;

/// Dictionary backed by the `words` table
#[derive(Clone)]
pub struct WordRepository {
    pool: SqlitePool,
}

impl WordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_word(&self, word: &str) -> bool {
        let found: Result<Option<(i64,)>, _> =
            sqlx::query_as("SELECT 1 FROM words WHERE word = ? LIMIT 1")
                .bind(word)
                .fetch_optional(&self.pool)
                .await;

        match found {
            Ok(row) => row.is_some(),
            Err(err) => {
                // Fail closed: an unreachable store knows no words
                warn!(word, %err, "Dictionary lookup failed");
                false
            }
        }
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM words")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

impl Dictionary for WordRepository {
    fn contains<'a>(&'a self, word: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(self.is_word(word))
    }
}
