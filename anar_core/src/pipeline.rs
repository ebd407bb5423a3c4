//! Pipeline - runs narrative and cultural analysis over one document.

use anar_rules::RuleBook;
use serde::{Deserialize, Serialize};

use crate::cultural::{CulturalAnalysis, CulturalProcessor};
use crate::error::AnalysisError;
use crate::input::ProcessedText;
use crate::narrative::{NarrativeAnalysis, NarrativeAnalyzer};
use crate::story_graph::StoryGraph;

/// Everything produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub processed: ProcessedText,
    pub narrative: NarrativeAnalysis,
    pub cultural: CulturalAnalysis,
    pub story_graph: StoryGraph,
}

/// Compiled rules for the whole analysis. Holds no per-document state, so one
/// pipeline can serve concurrent documents.
#[derive(Debug, Clone)]
pub struct Pipeline {
    narrative: NarrativeAnalyzer,
    cultural: CulturalProcessor,
}

impl Pipeline {
    /// Compile every table of the rule book. Fails on the first malformed table.
    pub fn from_rule_book(book: &RuleBook) -> Result<Self, AnalysisError> {
        Ok(Self {
            narrative: NarrativeAnalyzer::from_rule_book(book)?,
            cultural: CulturalProcessor::from_rule_book(book)?,
        })
    }

    pub fn with_defaults() -> Result<Self, AnalysisError> {
        Self::from_rule_book(&RuleBook::default())
    }

    /// Load and compile a TOML rule book.
    pub fn from_toml_str(source: &str) -> Result<Self, AnalysisError> {
        Self::from_rule_book(&RuleBook::from_toml_str(source)?)
    }

    /// Analyze an input record whose frame markers are already known.
    pub fn process(&self, input: &ProcessedText) -> DocumentAnalysis {
        let narrative = self.narrative.analyze(input);
        let cultural = self.cultural.process(input);
        let story_graph = StoryGraph::build(&narrative, &cultural);

        DocumentAnalysis {
            processed: input.clone(),
            narrative,
            cultural,
            story_graph,
        }
    }

    /// Detect frame and cultural markers in normalized text, then analyze it.
    pub fn process_text(&self, text: &str) -> DocumentAnalysis {
        let input = ProcessedText::detect(text, self.narrative.matcher());
        self.process(&input)
    }

    /// Parse a JSON input record and analyze it.
    pub fn process_json(&self, source: &str) -> Result<DocumentAnalysis, AnalysisError> {
        let input = ProcessedText::from_json_str(source)?;
        Ok(self.process(&input))
    }
}
