//! Regex rule definitions for narrative and marker extraction.

mod matcher;

pub use matcher::*;

use serde::{Deserialize, Serialize};

/// What a rule detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// A character mention (e.g. a royal or professional title and a name).
    Character,
    /// A narrative event cue.
    Event,
    /// A frame marker opening an embedded story.
    Frame,
    /// A cultural marker (era, custom or idiom).
    Cultural,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Character => "character",
            RuleCategory::Event => "event",
            RuleCategory::Frame => "frame",
            RuleCategory::Cultural => "cultural",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single regex rule. Declaration order within a rule list is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub category: RuleCategory,
    pub pattern: String,
    /// Optional sub-kind, e.g. `historical_era` for cultural markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Rule {
    pub fn new(category: RuleCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
            label: None,
        }
    }

    pub fn character(pattern: impl Into<String>) -> Self {
        Self::new(RuleCategory::Character, pattern)
    }

    pub fn event(pattern: impl Into<String>) -> Self {
        Self::new(RuleCategory::Event, pattern)
    }

    pub fn frame(pattern: impl Into<String>) -> Self {
        Self::new(RuleCategory::Frame, pattern)
    }

    pub fn cultural(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(RuleCategory::Cultural, pattern).with_label(label)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Built-in rules for classical Arabic frame narratives.
pub fn default_rules() -> Vec<Rule> {
    vec![
        // Characters
        Rule::character(r"[الـ]?ملك\s+\w+"),
        Rule::character(r"[الـ]?وزير\s+\w+"),
        Rule::character(r"[الـ]?تاجر\s+\w+"),
        // Events
        Rule::event(r"فلما كان [^،.]+"),
        Rule::event(r"ثم [^،.]+"),
        // Frame markers
        Rule::frame("قالت شهرزاد"),
        Rule::frame("وأدرك شهرزاد الصباح"),
        Rule::frame("حكى أن"),
        Rule::frame("وحدثني أيها الملك"),
        // Cultural markers
        Rule::cultural("historical_era", r"في عهد [^،.]+"),
        Rule::cultural("historical_era", r"زمن [^،.]+"),
        Rule::cultural("social_custom", "قبّل الأرض"),
        Rule::cultural("social_custom", "ضرب في الأرض"),
        Rule::cultural("idiomatic", "بين حانا ومانا"),
        Rule::cultural("idiomatic", "يضرب أخماساً في أسداس"),
    ]
}
