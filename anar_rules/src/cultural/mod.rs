//! Cultural-pattern table: literal phrases with category-specific metadata.

mod signals;

pub use signals::*;

use serde::{Deserialize, Serialize};

/// Categories of cultural expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CulturalCategory {
    /// Fixed idiomatic expression.
    Idiomatic,
    /// Reference to a historical period or ruler.
    Historical,
    /// Social or court custom.
    SocialCustom,
}

impl CulturalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CulturalCategory::Idiomatic => "idiomatic",
            CulturalCategory::Historical => "historical",
            CulturalCategory::SocialCustom => "social_custom",
        }
    }
}

impl std::fmt::Display for CulturalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific metadata attached to a cultural phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CulturalInfo {
    Idiomatic {
        meaning: String,
        /// Usage label, e.g. `travel_narrative`.
        context: String,
        /// Usage-context keywords corroborating the idiom in its surroundings.
        #[serde(default)]
        cues: Vec<String>,
    },
    Historical {
        period: String,
        year_range: (i32, i32),
    },
    SocialCustom {
        meaning: String,
        context: String,
    },
}

impl CulturalInfo {
    pub fn category(&self) -> CulturalCategory {
        match self {
            CulturalInfo::Idiomatic { .. } => CulturalCategory::Idiomatic,
            CulturalInfo::Historical { .. } => CulturalCategory::Historical,
            CulturalInfo::SocialCustom { .. } => CulturalCategory::SocialCustom,
        }
    }
}

/// One entry of the cultural-pattern table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalEntry {
    /// Literal phrase searched for in the text.
    pub phrase: String,
    #[serde(flatten)]
    pub info: CulturalInfo,
}

impl CulturalEntry {
    pub fn idiomatic(
        phrase: impl Into<String>,
        meaning: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            info: CulturalInfo::Idiomatic {
                meaning: meaning.into(),
                context: context.into(),
                cues: Vec::new(),
            },
        }
    }

    pub fn historical(
        phrase: impl Into<String>,
        period: impl Into<String>,
        years: (i32, i32),
    ) -> Self {
        Self {
            phrase: phrase.into(),
            info: CulturalInfo::Historical {
                period: period.into(),
                year_range: years,
            },
        }
    }

    pub fn social_custom(
        phrase: impl Into<String>,
        meaning: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            info: CulturalInfo::SocialCustom {
                meaning: meaning.into(),
                context: context.into(),
            },
        }
    }

    /// Add usage cues. Only meaningful for idiomatic entries.
    pub fn with_cues<I, S>(mut self, new_cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let CulturalInfo::Idiomatic { cues, .. } = &mut self.info {
            cues.extend(new_cues.into_iter().map(Into::into));
        }
        self
    }

    pub fn category(&self) -> CulturalCategory {
        self.info.category()
    }
}

/// Built-in cultural-pattern table for classical Arabic narrative.
pub fn default_cultural_table() -> Vec<CulturalEntry> {
    vec![
        CulturalEntry::idiomatic("ضرب في الأرض", "to travel extensively", "travel_narrative")
            .with_cues(["التجارة", "الربح", "السفر", "البلاد", "المدن"]),
        CulturalEntry::idiomatic(
            "بين حانا ومانا",
            "between a rock and a hard place",
            "difficulty",
        )
        .with_cues(["حيرة", "ضاع", "احتار", "ضيق"]),
        CulturalEntry::historical("في عهد هارون الرشيد", "Abbasid", (786, 809)),
        CulturalEntry::social_custom("قبّل الأرض بين يدي", "show deep respect", "court_etiquette"),
    ]
}
