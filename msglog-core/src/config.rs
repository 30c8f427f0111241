//! Application config: database, log file and paging defaults. Loaded from env.

use anyhow::Result;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./msglog.db";
pub const DEFAULT_LOG_FILE: &str = "logs/msglog.log";
pub const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DATABASE_URL: `sqlite:` URL or plain file path
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// MSGLOG_PAGE_SIZE: default limit for range queries
    pub page_size: i64,
}

impl AppConfig {
    /// Load from environment variables. `database_url` overrides DATABASE_URL if provided.
    pub fn load(database_url: Option<String>) -> Result<Self> {
        let database_url = database_url
            .or_else(|| env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let page_size = match env::var("MSGLOG_PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("MSGLOG_PAGE_SIZE is not an integer ({}): {}", raw, e))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let config = Self {
            database_url,
            log_file,
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is set but empty");
        }
        if self.page_size <= 0 {
            anyhow::bail!("MSGLOG_PAGE_SIZE must be positive, got {}", self.page_size);
        }
        Ok(())
    }
}
