//! Pattern matcher - applies an ordered rule list to normalized text.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Rule, RuleCategory};
use crate::error::ConfigError;
use crate::text::CharIndex;

/// A position-tagged match produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub category: RuleCategory,
    pub label: Option<String>,
    pub text: String,
    /// Zero-based character offset of the match start.
    pub position: usize,
    /// Index of the producing rule in declaration order.
    pub rule_index: usize,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    category: RuleCategory,
    label: Option<String>,
    regex: Regex,
}

/// Compiled, read-only rule set.
///
/// Matching is pure: the matcher carries no per-call state and can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Vec<CompiledRule>,
}

impl PatternMatcher {
    /// Compile an ordered rule list. Any malformed pattern fails the whole set,
    /// as does a pattern that matches empty text.
    pub fn new(rules: &[Rule]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|rule| {
                if rule.pattern.is_empty() {
                    return Err(ConfigError::EmptyPattern {
                        category: rule.category,
                    });
                }
                let regex = Regex::new(&rule.pattern).map_err(|source| {
                    ConfigError::InvalidPattern {
                        category: rule.category,
                        pattern: rule.pattern.clone(),
                        source,
                    }
                })?;
                if regex.is_match("") {
                    return Err(ConfigError::EmptyPattern {
                        category: rule.category,
                    });
                }
                Ok(CompiledRule {
                    category: rule.category,
                    label: rule.label.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rules = rules.len(), "compiled pattern matcher");
        Ok(Self { rules })
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All matches of every rule, sorted by position, ties by rule declaration order.
    ///
    /// Matches of one rule never overlap each other; matches of different
    /// rules may. Identical phrases at different offsets are distinct matches.
    pub fn find_all(&self, text: &str) -> Vec<RuleMatch> {
        self.find_where(text, |_| true)
    }

    /// Matches restricted to the given categories.
    pub fn find_categories(&self, text: &str, categories: &[RuleCategory]) -> Vec<RuleMatch> {
        self.find_where(text, |category| categories.contains(&category))
    }

    fn find_where<F>(&self, text: &str, keep: F) -> Vec<RuleMatch>
    where
        F: Fn(RuleCategory) -> bool,
    {
        if text.is_empty() {
            return Vec::new();
        }

        let index = CharIndex::new(text);
        let mut matches = Vec::new();

        for (rule_index, rule) in self.rules.iter().enumerate() {
            if !keep(rule.category) {
                continue;
            }
            for found in rule.regex.find_iter(text) {
                matches.push(RuleMatch {
                    category: rule.category,
                    label: rule.label.clone(),
                    text: found.as_str().to_string(),
                    position: index.char_offset(found.start()),
                    rule_index,
                });
            }
        }

        matches.sort_by_key(|m| (m.position, m.rule_index));
        tracing::trace!(matches = matches.len(), "pattern matching finished");
        matches
    }
}
