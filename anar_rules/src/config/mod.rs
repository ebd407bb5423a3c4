//! Rule book configuration - every table and parameter the core consumes.

use serde::{Deserialize, Serialize};

use crate::cultural::{default_cultural_table, CulturalEntry, SignalVocabulary};
use crate::error::ConfigError;
use crate::rules::{default_rules, Rule};

/// Parameters of cultural confidence scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Confidence every candidate starts with.
    pub base_confidence: f32,

    /// Bonus when a category-specific signal is present in the window.
    pub signal_bonus: f32,

    /// Bonus when the window holds at least `coherence_min_words` words.
    pub coherence_bonus: f32,

    pub coherence_min_words: usize,

    /// Characters of context taken either side of a match.
    pub window_radius: usize,

    /// Minimum confidence for a pattern to be retained.
    pub acceptance_threshold: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_confidence: 0.5,
            signal_bonus: 0.3,
            coherence_bonus: 0.2,
            coherence_min_words: 5,
            window_radius: 50,
            acceptance_threshold: 0.85,
        }
    }
}

impl ScoringConfig {
    /// Reject parameters outside the unit interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = [
            ("base_confidence", self.base_confidence),
            ("signal_bonus", self.signal_bonus),
            ("coherence_bonus", self.coherence_bonus),
            ("acceptance_threshold", self.acceptance_threshold),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidScoring(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// The complete set of rule tables.
///
/// Every section is optional in TOML and falls back to the built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBook {
    /// Regex rules in declaration order.
    pub rules: Vec<Rule>,

    /// Literal cultural phrases in table order.
    pub cultural: Vec<CulturalEntry>,

    pub signals: SignalVocabulary,

    pub scoring: ScoringConfig,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            cultural: default_cultural_table(),
            signals: SignalVocabulary::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl RuleBook {
    /// A rule book with no rules and no cultural phrases, default scoring.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            cultural: Vec::new(),
            signals: SignalVocabulary::default(),
            scoring: ScoringConfig::default(),
        }
    }

    /// Parse a rule book from TOML and validate the parts that need no compilation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let book: RuleBook = toml::from_str(source)?;
        book.validate()?;
        tracing::debug!(
            rules = book.rules.len(),
            cultural = book.cultural.len(),
            "loaded rule book"
        );
        Ok(book)
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_cultural(mut self, cultural: Vec<CulturalEntry>) -> Self {
        self.cultural = cultural;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cultural.iter().any(|entry| entry.phrase.is_empty()) {
            return Err(ConfigError::EmptyPhrase);
        }
        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cultural::{CulturalCategory, CulturalInfo};
    use crate::rules::RuleCategory;

    #[test]
    fn test_default_scoring() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.base_confidence, 0.5);
        assert_eq!(scoring.window_radius, 50);
        assert_eq!(scoring.acceptance_threshold, 0.85);
        assert!(scoring.validate().is_ok());
    }

    #[test]
    fn test_scoring_out_of_range() {
        let scoring = ScoringConfig {
            acceptance_threshold: 1.5,
            ..ScoringConfig::default()
        };
        assert!(matches!(scoring.validate(), Err(ConfigError::InvalidScoring(_))));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let book = RuleBook::from_toml_str("").unwrap();
        assert_eq!(book, RuleBook::default());
    }

    #[test]
    fn test_toml_rule_book() {
        let source = r#"
            [[rules]]
            category = "character"
            pattern = 'king \w+'

            [[rules]]
            category = "cultural"
            pattern = "once upon a time"
            label = "idiomatic"

            [[cultural]]
            phrase = "in the reign of"
            category = "historical"
            period = "Medieval"
            year_range = [1100, 1200]

            [[cultural]]
            phrase = "spill the beans"
            category = "idiomatic"
            meaning = "reveal a secret"
            context = "secret"
            cues = ["whisper"]

            [scoring]
            acceptance_threshold = 0.7
        "#;

        let book = RuleBook::from_toml_str(source).unwrap();

        assert_eq!(book.rules.len(), 2);
        assert_eq!(book.rules[0].category, RuleCategory::Character);
        assert_eq!(book.rules[1].label.as_deref(), Some("idiomatic"));

        assert_eq!(book.cultural.len(), 2);
        assert_eq!(book.cultural[0].category(), CulturalCategory::Historical);
        assert!(matches!(
            book.cultural[0].info,
            CulturalInfo::Historical { year_range: (1100, 1200), .. }
        ));
        assert!(matches!(
            &book.cultural[1].info,
            CulturalInfo::Idiomatic { cues, .. } if cues.len() == 1
        ));

        assert_eq!(book.scoring.acceptance_threshold, 0.7);
        assert_eq!(book.scoring.base_confidence, 0.5);
        assert_eq!(book.signals, SignalVocabulary::default());
    }

    #[test]
    fn test_partial_signals_keep_defaults() {
        let book =
            RuleBook::from_toml_str("[signals]\ntemporal_marker = \"in the (reign|time)\"\n")
                .unwrap();
        assert_eq!(book.signals.temporal_marker, "in the (reign|time)");
        assert_eq!(
            book.signals.royal_titles,
            SignalVocabulary::default().royal_titles
        );
    }

    #[test]
    fn test_toml_parse_error() {
        let err = RuleBook::from_toml_str("rules = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_phrase_rejected() {
        let source = r#"
            [[cultural]]
            phrase = ""
            category = "social_custom"
            meaning = "m"
            context = "c"
        "#;
        assert!(matches!(
            RuleBook::from_toml_str(source),
            Err(ConfigError::EmptyPhrase)
        ));
    }
}
