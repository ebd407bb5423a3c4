//! Narrative analysis - elements, graph, stories and character network.
//!
//! The stages run in order:
//! 1. **Extraction**: character and event rules plus frame markers, sorted by position
//! 2. **Graph**: elements chained into a single path
//! 3. **Segmentation**: one story per frame node
//! 4. **Network**: characters sharing a story are connected

mod element;
mod graph;
mod network;
mod segment;

pub use element::*;
pub use graph::*;
pub use network::*;
pub use segment::*;

use anar_rules::{PatternMatcher, RuleBook};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::input::ProcessedText;

/// Result of narrative analysis for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeAnalysis {
    pub narrative_graph: NarrativeGraph,
    pub nested_stories: Vec<Story>,
    pub character_network: CharacterNetwork,
}

/// Runs narrative analysis with a compiled rule set.
///
/// The analyzer only holds read-only rules; every call builds its own graph.
#[derive(Debug, Clone)]
pub struct NarrativeAnalyzer {
    matcher: PatternMatcher,
}

impl NarrativeAnalyzer {
    pub fn new(matcher: PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Compile the rule book's rules.
    pub fn from_rule_book(book: &RuleBook) -> Result<Self, AnalysisError> {
        Ok(Self::new(PatternMatcher::new(&book.rules)?))
    }

    /// Create an analyzer with the built-in rules.
    pub fn with_defaults() -> Result<Self, AnalysisError> {
        Self::from_rule_book(&RuleBook::default())
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn analyze(&self, input: &ProcessedText) -> NarrativeAnalysis {
        let elements =
            extract_elements(&input.normalized_text, &input.frame_markers, &self.matcher);
        let narrative_graph = NarrativeGraph::build(&elements);
        let nested_stories = segment_stories(&narrative_graph);
        let character_network = CharacterNetwork::build(&narrative_graph, &nested_stories);

        tracing::debug!(
            elements = elements.len(),
            stories = nested_stories.len(),
            characters = character_network.node_count(),
            "narrative analysis finished"
        );

        NarrativeAnalysis {
            narrative_graph,
            nested_stories,
            character_network,
        }
    }
}
