//! Errors surfaced by the analysis core.

use anar_rules::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed rule tables.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required input field is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// An input field is present but has the wrong shape.
    #[error("field `{field}` must be {expected}")]
    WrongShape {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// A deserialized graph whose stored adjacency does not describe its nodes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("`{field}` has {found} entries for {expected} nodes")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{field}` references node {index} of {len}")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("duplicate node `{0}`")]
    DuplicateNode(String),

    #[error("node {index} has id `{found}`, expected `{expected}`")]
    UnexpectedId {
        index: usize,
        expected: String,
        found: String,
    },

    /// Edges that do not chain node `n` to node `n + 1`, or nodes out of position order.
    #[error("node {0} breaks the sequential path")]
    NotAPath(usize),

    #[error("edge between nodes {0} and {1} is not mirrored")]
    Unmirrored(usize, usize),

    #[error("self-loop on node {0}")]
    SelfLoop(usize),
}

impl GraphError {
    pub(crate) fn check_len(
        field: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), GraphError> {
        if expected == found {
            Ok(())
        } else {
            Err(GraphError::LengthMismatch {
                field,
                expected,
                found,
            })
        }
    }

    pub(crate) fn check_index(
        field: &'static str,
        index: usize,
        len: usize,
    ) -> Result<(), GraphError> {
        if index < len {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange { field, index, len })
        }
    }
}
