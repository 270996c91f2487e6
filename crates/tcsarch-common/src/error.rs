//! Error types for TCSArch

use thiserror::Error;

/// Result type alias for TCSArch operations
pub type Result<T> = std::result::Result<T, TcsError>;

/// Main error type for TCSArch
#[derive(Error, Debug)]
pub enum TcsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A domain hit that cannot take part in normalization.
    ///
    /// `index` is the hit's position in the list being processed.
    #[error("Malformed hit #{index} in protein {protein}: {reason}")]
    MalformedHit {
        protein: String,
        index: usize,
        reason: String,
    },

    /// A gene record that cannot be turned into a protein row
    #[error("Malformed gene {protein}: {reason}")]
    MalformedGene { protein: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl TcsError {
    /// Create a malformed hit error
    pub fn malformed_hit(
        protein: impl Into<String>,
        index: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedHit {
            protein: protein.into(),
            index,
            reason: reason.into(),
        }
    }

    /// Create a malformed gene error
    pub fn malformed_gene(protein: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGene {
            protein: protein.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error concerns a single protein's data
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedHit { .. } | Self::MalformedGene { .. })
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
