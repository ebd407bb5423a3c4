//! Configuration errors raised while loading or compiling rule tables.

use thiserror::Error;

use crate::rules::RuleCategory;

/// A malformed rule table. Always raised at load time, never during analysis.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {category} rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        category: RuleCategory,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Empty, or able to match empty text.
    #[error("{category} rule pattern is empty or matches empty text")]
    EmptyPattern { category: RuleCategory },

    #[error("invalid temporal marker pattern `{pattern}`: {source}")]
    InvalidSignal {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cultural pattern table contains an empty phrase")]
    EmptyPhrase,

    #[error("invalid scoring configuration: {0}")]
    InvalidScoring(String),

    #[error("failed to parse rule book: {0}")]
    Parse(#[from] toml::de::Error),
}
