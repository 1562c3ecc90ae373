use crate::utils::AppError;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "mongodb://mongo:27017/nodejs-mongo-app";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_INDEX_FILE: &str = "views/index.html";

/// Runtime settings. Every value falls back to the historical hard-coded one.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
    /// Abort startup when MongoDB can't be reached instead of serving anyway.
    pub db_fail_fast: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // Load environment variables
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT={}: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let index_file = lookup("INDEX_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_FILE));
        let db_fail_fast = lookup("DB_FAIL_FAST")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            static_dir,
            index_file,
            db_fail_fast,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
