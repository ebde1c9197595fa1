mod importer;
mod wordlist;

use clap::Parser;
use importer::{import_words, prepare_words};
use sqlx::SqlitePool;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seed", about = "Seed the word database from plain word lists")]
struct Args {
    /// Word list files, one word per line
    #[arg(short, long, required = true, num_args = 1..)]
    words: Vec<PathBuf>,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://words.db?mode=rwc")]
    database_url: String,

    /// Shortest word to keep
    #[arg(long, default_value_t = 3)]
    min_length: usize,

    /// Maximum number of words to import
    #[arg(short, long)]
    limit: Option<usize>,

    /// Clear existing words before import
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Connecting to database...");
    let pool = SqlitePool::connect(&args.database_url).await?;

    // Run migrations to ensure schema exists
    sqlx::migrate!("../../backend/migrations").run(&pool).await?;

    if args.clear {
        println!("Clearing existing words...");
        sqlx::query("DELETE FROM words").execute(&pool).await?;
    }

    let mut entries = Vec::new();
    for path in &args.words {
        println!("Reading word list: {:?}", path);
        let list = wordlist::parse_word_list(path)?;
        println!("Found {} entries", list.len());
        entries.extend(list);
    }

    println!("Importing words...");
    let (words, mut stats) = prepare_words(entries, args.min_length, args.limit);
    import_words(&pool, &words, &mut stats).await?;

    println!();
    println!("Import complete:");
    println!("  Filtered (passed all checks): {}", stats.filtered);
    println!("  Inserted into database:       {}", stats.inserted);
    println!("  Skipped (short/invalid/dup):  {}", stats.skipped);

    Ok(())
}
