//! Context mapping - buckets accepted patterns by category.

use anar_rules::CulturalInfo;
use serde::{Deserialize, Serialize};

use super::CulturalPattern;

/// Temporal context from a historical reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalContext {
    pub period: String,
    pub years: (i32, i32),
    pub text: String,
}

/// Social context from a custom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialContext {
    pub custom: String,
    pub meaning: String,
    pub context: String,
}

/// Cultural context from an idiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalContext {
    pub expression: String,
    pub meaning: String,
    pub usage: String,
}

/// Accepted patterns partitioned by category, each bucket in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContextBuckets {
    pub temporal: Vec<TemporalContext>,
    pub social: Vec<SocialContext>,
    pub cultural: Vec<CulturalContext>,
}

impl ContextBuckets {
    pub fn from_patterns(patterns: &[CulturalPattern]) -> Self {
        let mut buckets = Self::default();

        for pattern in patterns {
            match &pattern.info {
                CulturalInfo::Historical { period, year_range } => {
                    buckets.temporal.push(TemporalContext {
                        period: period.clone(),
                        years: *year_range,
                        text: pattern.pattern.clone(),
                    })
                }
                CulturalInfo::SocialCustom { meaning, context } => {
                    buckets.social.push(SocialContext {
                        custom: pattern.pattern.clone(),
                        meaning: meaning.clone(),
                        context: context.clone(),
                    })
                }
                CulturalInfo::Idiomatic { meaning, context, .. } => {
                    buckets.cultural.push(CulturalContext {
                        expression: pattern.pattern.clone(),
                        meaning: meaning.clone(),
                        usage: context.clone(),
                    })
                }
            }
        }

        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.temporal.is_empty() && self.social.is_empty() && self.cultural.is_empty()
    }

    pub fn len(&self) -> usize {
        self.temporal.len() + self.social.len() + self.cultural.len()
    }
}
