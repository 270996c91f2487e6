//! Retrieval configuration
//!
//! Settings for talking to the MiST API: which database, how pages are
//! requested, and how transient failures are retried.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tcsarch_common::{Result, TcsError};

// ============================================================================
// Retrieval Configuration Constants
// ============================================================================

/// MiST genomes API (complete genomes).
pub const MIST_GENOMES_URL: &str = "https://mib-jouline-db.asc.ohio-state.edu/v1/genomes/";

/// MiST metagenome-assembled genomes API.
pub const MIST_MAGS_URL: &str = "https://metagenomes.asc.ohio-state.edu/v1/genomes/";

/// Items requested per page.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Upper bound on pages requested per resource. 100 pages of 100 items is an
/// order of magnitude above the component or gene count of any genome.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Attempts per page request before the genome is logged as failed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Fixed pause between attempts, in seconds.
pub const DEFAULT_RETRY_BACKOFF_SECS: u64 = 5;

/// HTTP timeout for a single page request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Genome database to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    /// Complete genomes
    #[default]
    Mist,
    /// Metagenome-assembled genomes
    MistMags,
}

impl Database {
    pub fn base_url(self) -> &'static str {
        match self {
            Database::Mist => MIST_GENOMES_URL,
            Database::MistMags => MIST_MAGS_URL,
        }
    }
}

/// Configuration for MiST retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistConfig {
    /// Genomes endpoint, ending in '/'; the genome id is appended directly
    pub base_url: String,

    pub per_page: u32,

    pub max_pages: u32,

    /// Maximum attempts for one page request (first try included)
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub retry_backoff_secs: u64,

    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for MistConfig {
    fn default() -> Self {
        Self::for_database(Database::default())
    }
}

impl MistConfig {
    /// Defaults pointed at the given database
    pub fn for_database(database: Database) -> Self {
        Self {
            base_url: database.base_url().to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_secs: DEFAULT_RETRY_BACKOFF_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("tcsarch-ingest/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load configuration for a database, then apply `.env` and environment
    /// overrides
    ///
    /// Environment variables:
    /// - `TCSARCH_BASE_URL`
    /// - `TCSARCH_PER_PAGE`
    /// - `TCSARCH_MAX_PAGES`
    /// - `TCSARCH_MAX_ATTEMPTS`
    /// - `TCSARCH_RETRY_BACKOFF_SECS`
    /// - `TCSARCH_TIMEOUT_SECS`
    pub fn from_env(database: Database) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::for_database(database);

        if let Ok(url) = std::env::var("TCSARCH_BASE_URL") {
            config.base_url = url;
        }
        config.per_page = env_number("TCSARCH_PER_PAGE", config.per_page)?;
        config.max_pages = env_number("TCSARCH_MAX_PAGES", config.max_pages)?;
        config.max_attempts = env_number("TCSARCH_MAX_ATTEMPTS", config.max_attempts)?;
        config.retry_backoff_secs =
            env_number("TCSARCH_RETRY_BACKOFF_SECS", config.retry_backoff_secs)?;
        config.timeout_secs = env_number("TCSARCH_TIMEOUT_SECS", config.timeout_secs)?;

        config.validate()?;
        Ok(config)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(TcsError::config("Base URL cannot be empty"));
        }

        if self.per_page == 0 {
            return Err(TcsError::config("per_page must be greater than 0"));
        }

        if self.max_pages == 0 {
            return Err(TcsError::config("max_pages must be greater than 0"));
        }

        if self.max_attempts == 0 {
            return Err(TcsError::config("max_attempts must be greater than 0"));
        }

        if self.timeout_secs == 0 {
            return Err(TcsError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TcsError::config(format!("{} is not a valid number: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
