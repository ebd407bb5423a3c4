//! Cultural pattern detection and confidence scoring.
//!
//! Detection works in three steps:
//! 1. **Detection**: every literal occurrence of every table phrase, with a context window
//! 2. **Scoring**: base confidence plus signal and coherence bonuses, clamped to [0, 1]
//! 3. **Validation**: only candidates at or above the acceptance threshold are kept

mod context;

pub use context::*;

use anar_rules::{
    CharIndex, CulturalCategory, CulturalEntry, CulturalInfo, RuleBook, ScoringConfig, Signals,
};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::input::ProcessedText;

/// A detected cultural expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalPattern {
    pub pattern: String,
    /// Character offset of the match start.
    pub position: usize,
    pub info: CulturalInfo,
    /// Text surrounding the match, clipped at text boundaries.
    pub context_window: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
}

impl CulturalPattern {
    /// Category, as carried by the metadata tag.
    pub fn category(&self) -> CulturalCategory {
        self.info.category()
    }
}

/// Result of cultural analysis for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CulturalAnalysis {
    /// Accepted patterns in ascending position.
    pub patterns: Vec<CulturalPattern>,
    pub contexts: ContextBuckets,
}

/// Detects and scores cultural expressions from a fixed table.
#[derive(Debug, Clone)]
pub struct CulturalProcessor {
    table: Vec<CulturalEntry>,
    signals: Signals,
    scoring: ScoringConfig,
}

impl CulturalProcessor {
    /// Compile the rule book's cultural table, signals and scoring parameters.
    pub fn from_rule_book(book: &RuleBook) -> Result<Self, AnalysisError> {
        book.validate()?;
        Ok(Self {
            table: book.cultural.clone(),
            signals: Signals::new(&book.signals)?,
            scoring: book.scoring.clone(),
        })
    }

    /// Create a processor with the built-in tables.
    pub fn with_defaults() -> Result<Self, AnalysisError> {
        Self::from_rule_book(&RuleBook::default())
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn process(&self, input: &ProcessedText) -> CulturalAnalysis {
        let candidates = self.detect(&input.normalized_text);
        let patterns = self.validate(candidates);
        let contexts = ContextBuckets::from_patterns(&patterns);

        tracing::debug!(patterns = patterns.len(), "cultural analysis finished");
        CulturalAnalysis { patterns, contexts }
    }

    /// All candidates with their confidence, accepted or not, in ascending position.
    pub fn detect(&self, text: &str) -> Vec<CulturalPattern> {
        if text.is_empty() {
            return Vec::new();
        }

        let index = CharIndex::new(text);
        let mut candidates = Vec::new();

        for entry in &self.table {
            let phrase_len = entry.phrase.chars().count();
            for (byte, _) in text.match_indices(entry.phrase.as_str()) {
                let start = index.char_offset(byte);
                let context_window = index
                    .window(start, start + phrase_len, self.scoring.window_radius)
                    .to_string();

                let mut candidate = CulturalPattern {
                    pattern: entry.phrase.clone(),
                    position: start,
                    info: entry.info.clone(),
                    context_window,
                    confidence: 0.0,
                };
                candidate.confidence = self.confidence(&candidate);
                candidates.push(candidate);
            }
        }

        candidates.sort_by_key(|c| c.position);
        candidates
    }

    /// Keep candidates at or above the acceptance threshold.
    pub fn validate(&self, candidates: Vec<CulturalPattern>) -> Vec<CulturalPattern> {
        candidates
            .into_iter()
            .filter(|c| {
                let accepted = c.confidence >= self.scoring.acceptance_threshold;
                tracing::trace!(
                    pattern = %c.pattern,
                    position = c.position,
                    confidence = c.confidence,
                    accepted,
                    "scored cultural candidate"
                );
                accepted
            })
            .collect()
    }

    /// Confidence of a candidate, clamped to [0, 1].
    pub fn confidence(&self, candidate: &CulturalPattern) -> f32 {
        let window = candidate.context_window.as_str();
        let mut confidence = self.scoring.base_confidence;

        if self.has_signal(&candidate.info, window) {
            confidence += self.scoring.signal_bonus;
        }

        if window.split_whitespace().count() >= self.scoring.coherence_min_words {
            confidence += self.scoring.coherence_bonus;
        }

        confidence.clamp(0.0, 1.0)
    }

    fn has_signal(&self, info: &CulturalInfo, window: &str) -> bool {
        match info {
            CulturalInfo::Idiomatic { context, cues, .. } => {
                let window = window.to_lowercase();
                std::iter::once(context)
                    .chain(cues)
                    .filter(|cue| !cue.is_empty())
                    .any(|cue| window.contains(&cue.to_lowercase()))
            }
            CulturalInfo::Historical { .. } => self.signals.has_temporal_marker(window),
            CulturalInfo::SocialCustom { .. } => self.signals.has_royal_title(window),
        }
    }
}
