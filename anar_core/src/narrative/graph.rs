//! Narrative graph - elements chained in text order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ElementType, NarrativeElement};
use crate::error::GraphError;

/// Synthetic node identifier of the form `{type}_{counter}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(element_type: ElementType, counter: usize) -> Self {
        Self(format!("{}_{}", element_type, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of the narrative graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeNode {
    pub id: NodeId,
    pub element: NarrativeElement,
}

/// Directed graph over narrative elements.
///
/// Built by [`NarrativeGraph::build`], the graph is a single path: node
/// insertion order is ascending position and every node has at most one
/// successor and one predecessor. Deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawNarrativeGraph")]
pub struct NarrativeGraph {
    nodes: Vec<NarrativeNode>,

    /// Adjacency list by node index.
    outgoing: Vec<Vec<usize>>,

    incoming: Vec<Vec<usize>>,

    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

#[derive(Deserialize)]
struct RawNarrativeGraph {
    nodes: Vec<NarrativeNode>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl TryFrom<RawNarrativeGraph> for NarrativeGraph {
    type Error = GraphError;

    fn try_from(raw: RawNarrativeGraph) -> Result<Self, Self::Error> {
        let len = raw.nodes.len();
        GraphError::check_len("outgoing", len, raw.outgoing.len())?;
        GraphError::check_len("incoming", len, raw.incoming.len())?;

        let mut index = HashMap::with_capacity(len);
        for (idx, node) in raw.nodes.iter().enumerate() {
            let expected = NodeId::new(node.element.element_type, idx);
            if node.id != expected {
                return Err(GraphError::UnexpectedId {
                    index: idx,
                    expected: expected.0,
                    found: node.id.0.clone(),
                });
            }
            if idx > 0 && raw.nodes[idx - 1].element.position > node.element.position {
                return Err(GraphError::NotAPath(idx));
            }
            index.insert(expected, idx);
        }

        for idx in 0..len {
            let next = (idx + 1 < len).then_some(idx + 1);
            let prev = idx.checked_sub(1);
            let outgoing = &raw.outgoing[idx];
            let incoming = &raw.incoming[idx];
            if outgoing.len() > 1 || outgoing.first().copied() != next {
                return Err(GraphError::NotAPath(idx));
            }
            if incoming.len() > 1 || incoming.first().copied() != prev {
                return Err(GraphError::NotAPath(idx));
            }
        }

        Ok(Self {
            nodes: raw.nodes,
            outgoing: raw.outgoing,
            incoming: raw.incoming,
            index,
        })
    }
}

impl NarrativeGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain elements into a path in ascending position order.
    ///
    /// Each element becomes a node; an edge links every node to the node
    /// created right after it. The graph is a fresh value per call.
    pub fn build(elements: &[NarrativeElement]) -> Self {
        let mut ordered: Vec<&NarrativeElement> = elements.iter().collect();
        ordered.sort_by_key(|e| e.position);

        let mut graph = Self::new();
        let mut previous: Option<usize> = None;

        for element in ordered {
            let node = graph.add_node(element.clone());
            if let Some(prev) = previous {
                graph.add_edge(prev, node);
            }
            previous = Some(node);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built narrative graph"
        );
        graph
    }

    fn add_node(&mut self, element: NarrativeElement) -> usize {
        let idx = self.nodes.len();
        let id = NodeId::new(element.element_type, idx);
        self.index.insert(id.clone(), idx);
        self.nodes.push(NarrativeNode { id, element });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        if !self.outgoing[from].contains(&to) {
            self.outgoing[from].push(to);
            self.incoming[to].push(from);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NarrativeNode> {
        self.nodes.iter()
    }

    pub fn node(&self, id: &NodeId) -> Option<&NarrativeNode> {
        self.node_index(id).map(|idx| &self.nodes[idx])
    }

    fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All edges as `(source, target)` pairs, by source insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.outgoing.iter().enumerate().flat_map(move |(from, targets)| {
            targets
                .iter()
                .map(move |&to| (&self.nodes[from].id, &self.nodes[to].id))
        })
    }

    pub fn successors(&self, id: &NodeId) -> Vec<&NarrativeNode> {
        self.node_index(id)
            .map(|idx| self.outgoing[idx].iter().map(|&to| &self.nodes[to]).collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, id: &NodeId) -> Vec<&NarrativeNode> {
        self.node_index(id)
            .map(|idx| self.incoming[idx].iter().map(|&from| &self.nodes[from]).collect())
            .unwrap_or_default()
    }

    /// The successor a traversal follows: the first one added.
    pub fn first_successor(&self, id: &NodeId) -> Option<&NarrativeNode> {
        let idx = self.node_index(id)?;
        self.outgoing[idx].first().map(|&to| &self.nodes[to])
    }

    pub fn out_degree(&self, id: &NodeId) -> usize {
        self.node_index(id).map_or(0, |idx| self.outgoing[idx].len())
    }

    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.node_index(id).map_or(0, |idx| self.incoming[idx].len())
    }

    /// Frame nodes in insertion order.
    pub fn frame_nodes(&self) -> impl Iterator<Item = &NarrativeNode> {
        self.nodes.iter().filter(|n| n.element.is_frame())
    }

    /// Nodes of the given element type in insertion order.
    pub fn nodes_of_type(&self, element_type: ElementType) -> impl Iterator<Item = &NarrativeNode> {
        self.nodes
            .iter()
            .filter(move |n| n.element.element_type == element_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_elements() -> Vec<NarrativeElement> {
        vec![
            NarrativeElement::character("king arthur", 10),
            NarrativeElement::frame("once", 0),
            NarrativeElement::event("then rode", 25),
            NarrativeElement::frame("and so", 40),
        ]
    }

    #[test]
    fn test_build_path_in_position_order() {
        let graph = NarrativeGraph::build(&sample_elements());

        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["frame_0", "character_1", "event_2", "frame_3"]);

        let edges: Vec<_> = graph
            .edges()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("frame_0", "character_1"),
                ("character_1", "event_2"),
                ("event_2", "frame_3"),
            ]
        );
    }

    #[test]
    fn test_single_path_degrees() {
        let graph = NarrativeGraph::build(&sample_elements());

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        for node in graph.nodes() {
            assert!(graph.out_degree(&node.id) <= 1);
            assert!(graph.in_degree(&node.id) <= 1);
        }

        let first = NodeId("frame_0".to_string());
        let last = NodeId("frame_3".to_string());
        assert_eq!(graph.in_degree(&first), 0);
        assert_eq!(graph.out_degree(&last), 0);
        assert!(graph.first_successor(&last).is_none());
        assert_eq!(graph.predecessors(&last)[0].element.text, "then rode");
    }

    #[test]
    fn test_empty_and_single_element() {
        let empty = NarrativeGraph::build(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.edge_count(), 0);

        let single = NarrativeGraph::build(&[NarrativeElement::character("sultan", 3)]);
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);
    }

    #[test]
    fn test_node_lookup() {
        let graph = NarrativeGraph::build(&sample_elements());
        let node = graph.node(&NodeId("event_2".to_string())).unwrap();
        assert_eq!(node.element.position, 25);
        assert!(graph.node(&NodeId("event_9".to_string())).is_none());
        assert_eq!(graph.frame_nodes().count(), 2);
        assert_eq!(graph.nodes_of_type(ElementType::Character).count(), 1);
    }

    #[test]
    fn test_builds_are_independent_and_deterministic() {
        let first = NarrativeGraph::build(&sample_elements());
        let second = NarrativeGraph::build(&sample_elements());
        assert_eq!(first, second);

        let other = NarrativeGraph::build(&[NarrativeElement::frame("x", 0)]);
        assert_eq!(other.node_count(), 1);
        assert_eq!(first.node_count(), 4);
    }

    #[test]
    fn test_lookup_after_deserialization() {
        let graph = NarrativeGraph::build(&sample_elements());
        let json = serde_json::to_string(&graph).unwrap();
        let restored: NarrativeGraph = serde_json::from_str(&json).unwrap();

        let id = NodeId("character_1".to_string());
        assert_eq!(restored.successors(&id)[0].id.as_str(), "event_2");
        assert_eq!(restored, graph);
    }

    fn frame_node_json() -> serde_json::Value {
        serde_json::json!({
            "id": "frame_0",
            "element": { "type": "frame", "text": "once", "position": 0 }
        })
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let json = serde_json::json!({
            "nodes": [frame_node_json()],
            "outgoing": [[7]],
            "incoming": [[]],
        });
        let err = serde_json::from_value::<NarrativeGraph>(json).unwrap_err();
        assert!(err.to_string().contains("sequential path"), "{err}");
    }

    #[test]
    fn test_adjacency_length_mismatch_rejected() {
        let json = serde_json::json!({
            "nodes": [frame_node_json()],
            "outgoing": [],
            "incoming": [[]],
        });
        assert!(serde_json::from_value::<NarrativeGraph>(json).is_err());
    }

    #[test]
    fn test_unexpected_node_id_rejected() {
        let mut node = frame_node_json();
        node["id"] = serde_json::json!("frame_4");
        let json = serde_json::json!({
            "nodes": [node],
            "outgoing": [[]],
            "incoming": [[]],
        });
        let err = serde_json::from_value::<NarrativeGraph>(json).unwrap_err();
        assert!(err.to_string().contains("frame_4"), "{err}");
    }

    #[test]
    fn test_tampered_edge_rejected() {
        let graph = NarrativeGraph::build(&sample_elements());
        let mut json = serde_json::to_value(&graph).unwrap();
        json["outgoing"][0] = serde_json::json!([2]);
        assert!(serde_json::from_value::<NarrativeGraph>(json).is_err());
    }
}
