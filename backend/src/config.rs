use std::env;
use std::path::PathBuf;
use words_collide::GameConfig;
use words_collide::session::ROUND_DURATION_SECS;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "sqlite://words.db?mode=rwc";

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub words_file: Option<PathBuf>,
    pub round_seconds: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            words_file: env::var("WORDS_FILE").ok().map(PathBuf::from),
            round_seconds: env::var("ROUND_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(ROUND_DURATION_SECS),
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            round_duration_secs: self.round_seconds,
            ..GameConfig::default()
        }
    }
}
