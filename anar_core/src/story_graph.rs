//! Story graph - stories, their elements and accepted cultural patterns in one graph.

use anar_rules::CulturalInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cultural::CulturalAnalysis;
use crate::error::GraphError;
use crate::narrative::{ElementType, NarrativeAnalysis};

/// Node payload of the story graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoryNodeKind {
    /// A story, labelled with its frame marker.
    Story { frame: String },
    /// A story element.
    Element {
        element_type: ElementType,
        text: String,
    },
    /// An accepted cultural pattern.
    Cultural { text: String, info: CulturalInfo },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryNode {
    /// `story_{n}`, `{type}_{n}` or `cultural_{n}`, with `n` the node count at insertion.
    pub id: String,
    pub kind: StoryNodeKind,
}

/// Directed graph combining nested stories and cultural patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawStoryGraph")]
pub struct StoryGraph {
    nodes: Vec<StoryNode>,
    edges: Vec<(usize, usize)>,
}

#[derive(Deserialize)]
struct RawStoryGraph {
    nodes: Vec<StoryNode>,
    edges: Vec<(usize, usize)>,
}

impl TryFrom<RawStoryGraph> for StoryGraph {
    type Error = GraphError;

    fn try_from(raw: RawStoryGraph) -> Result<Self, Self::Error> {
        let len = raw.nodes.len();
        {
            let mut seen = HashSet::with_capacity(len);
            for node in &raw.nodes {
                if !seen.insert(node.id.as_str()) {
                    return Err(GraphError::DuplicateNode(node.id.clone()));
                }
            }
        }
        for &(from, to) in &raw.edges {
            GraphError::check_index("edges", from, len)?;
            GraphError::check_index("edges", to, len)?;
        }

        Ok(Self {
            nodes: raw.nodes,
            edges: raw.edges,
        })
    }
}

impl StoryGraph {
    /// Build the combined graph.
    ///
    /// Each story node is followed by a chain of its elements. Each accepted
    /// cultural pattern gets a node linked from every character or event node
    /// whose text contains the pattern phrase.
    pub fn build(narrative: &NarrativeAnalysis, cultural: &CulturalAnalysis) -> Self {
        let mut graph = Self::default();

        for story in &narrative.nested_stories {
            let id = format!("story_{}", graph.nodes.len());
            let mut previous = graph.add_node(
                id,
                StoryNodeKind::Story {
                    frame: story.frame_marker.clone(),
                },
            );

            for element in &story.elements {
                let id = format!("{}_{}", element.element_type, graph.nodes.len());
                let node = graph.add_node(
                    id,
                    StoryNodeKind::Element {
                        element_type: element.element_type,
                        text: element.text.clone(),
                    },
                );
                graph.edges.push((previous, node));
                previous = node;
            }
        }

        for pattern in &cultural.patterns {
            let id = format!("cultural_{}", graph.nodes.len());
            let cultural_node = graph.add_node(
                id,
                StoryNodeKind::Cultural {
                    text: pattern.pattern.clone(),
                    info: pattern.info.clone(),
                },
            );

            let linked: Vec<usize> = graph
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(idx, node)| match &node.kind {
                    StoryNodeKind::Element { element_type, text }
                        if *element_type != ElementType::Frame
                            && text.contains(pattern.pattern.as_str()) =>
                    {
                        Some(idx)
                    }
                    _ => None,
                })
                .collect();

            graph
                .edges
                .extend(linked.into_iter().map(|idx| (idx, cultural_node)));
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built story graph"
        );
        graph
    }

    fn add_node(&mut self, id: String, kind: StoryNodeKind) -> usize {
        self.nodes.push(StoryNode { id, kind });
        self.nodes.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter()
    }

    pub fn node(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges as `(source id, target id)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(from, to)| (self.nodes[from].id.as_str(), self.nodes[to].id.as_str()))
    }

    pub fn successors(&self, id: &str) -> Vec<&StoryNode> {
        self.edges
            .iter()
            .filter(|&&(from, _)| self.nodes[from].id == id)
            .map(|&(_, to)| &self.nodes[to])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cultural::{ContextBuckets, CulturalPattern};
    use crate::narrative::{CharacterNetwork, NarrativeGraph, Story, StoryElement};
    use anar_rules::CulturalEntry;

    fn narrative(stories: Vec<Story>) -> NarrativeAnalysis {
        NarrativeAnalysis {
            narrative_graph: NarrativeGraph::new(),
            nested_stories: stories,
            character_network: CharacterNetwork::new(),
        }
    }

    fn story(frame: &str, elements: &[(ElementType, &str)]) -> Story {
        Story {
            frame_marker: frame.to_string(),
            elements: elements
                .iter()
                .map(|(element_type, text)| StoryElement {
                    element_type: *element_type,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    fn cultural(phrase: &str) -> CulturalAnalysis {
        let entry = CulturalEntry::social_custom(phrase, "respect", "court");
        let patterns = vec![CulturalPattern {
            pattern: entry.phrase,
            position: 0,
            info: entry.info,
            context_window: String::new(),
            confidence: 1.0,
        }];
        CulturalAnalysis {
            contexts: ContextBuckets::from_patterns(&patterns),
            patterns,
        }
    }

    #[test]
    fn test_story_chains() {
        let narrative = narrative(vec![
            story(
                "once",
                &[(ElementType::Character, "king arthur"), (ElementType::Event, "then rode")],
            ),
            story("and so", &[]),
        ]);

        let graph = StoryGraph::build(&narrative, &CulturalAnalysis::default());

        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["story_0", "character_1", "event_2", "story_3"]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(
            edges,
            vec![("story_0", "character_1"), ("character_1", "event_2")]
        );
        assert!(matches!(
            &graph.node("story_3").unwrap().kind,
            StoryNodeKind::Story { frame } if frame == "and so"
        ));
    }

    #[test]
    fn test_cultural_nodes_link_to_containing_elements() {
        let narrative = narrative(vec![story(
            "once",
            &[
                (ElementType::Event, "then he bowed low before the king"),
                (ElementType::Character, "king lot"),
            ],
        )]);

        let graph = StoryGraph::build(&narrative, &cultural("bowed low"));

        assert_eq!(graph.node_count(), 4);
        let cultural_node = graph.node("cultural_3").unwrap();
        assert!(matches!(
            cultural_node.kind,
            StoryNodeKind::Cultural {
                info: CulturalInfo::SocialCustom { .. },
                ..
            }
        ));
        let linked: Vec<_> = graph.successors("event_1").iter().map(|n| n.id.clone()).collect();
        assert!(linked.contains(&"cultural_3".to_string()));
        assert!(graph.successors("character_2").is_empty());
    }

    #[test]
    fn test_deserialization_checks_edges() {
        let narrative = narrative(vec![story("once", &[(ElementType::Character, "king lot")])]);
        let graph = StoryGraph::build(&narrative, &CulturalAnalysis::default());

        let json = serde_json::to_value(&graph).unwrap();
        let restored: StoryGraph = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, graph);

        let mut dangling = json.clone();
        dangling["edges"] = serde_json::json!([[0, 9]]);
        assert!(serde_json::from_value::<StoryGraph>(dangling).is_err());

        let mut duplicated = json;
        duplicated["nodes"][1]["id"] = serde_json::json!("story_0");
        assert!(serde_json::from_value::<StoryGraph>(duplicated).is_err());
    }

    #[test]
    fn test_empty_story_graph() {
        let graph = StoryGraph::build(&narrative(Vec::new()), &CulturalAnalysis::default());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
