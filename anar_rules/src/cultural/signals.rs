//! Corroborating-signal vocabulary used by confidence scoring.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Raw signal vocabulary as stored in a rule book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalVocabulary {
    /// Regex for temporal markers corroborating historical references.
    pub temporal_marker: String,
    /// Royal titles corroborating social customs.
    pub royal_titles: Vec<String>,
}

impl Default for SignalVocabulary {
    fn default() -> Self {
        Self {
            temporal_marker: "في (عهد|زمن|وقت)".to_string(),
            royal_titles: vec![
                "الملك".to_string(),
                "السلطان".to_string(),
                "الوزير".to_string(),
            ],
        }
    }
}

/// Compiled signal vocabulary.
#[derive(Debug, Clone)]
pub struct Signals {
    temporal_marker: Regex,
    royal_titles: Vec<String>,
}

impl Signals {
    pub fn new(vocabulary: &SignalVocabulary) -> Result<Self, ConfigError> {
        let temporal_marker =
            Regex::new(&vocabulary.temporal_marker).map_err(|source| ConfigError::InvalidSignal {
                pattern: vocabulary.temporal_marker.clone(),
                source,
            })?;

        Ok(Self {
            temporal_marker,
            royal_titles: vocabulary
                .royal_titles
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect(),
        })
    }

    /// Whether the window contains a temporal marker phrase.
    pub fn has_temporal_marker(&self, window: &str) -> bool {
        self.temporal_marker.is_match(window)
    }

    /// Whether the window contains any royal title.
    pub fn has_royal_title(&self, window: &str) -> bool {
        self.royal_titles.iter().any(|title| window.contains(title.as_str()))
    }
}
