//! Character co-occurrence network.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{ElementType, NarrativeGraph, Story};
use crate::error::GraphError;

/// Undirected simple graph over distinct character names.
///
/// Characters are identified by their raw matched text. Two characters are
/// connected when they appear together in at least one story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawCharacterNetwork")]
pub struct CharacterNetwork {
    /// Character names in first-appearance order.
    names: Vec<String>,

    /// Neighbour sets by name index.
    adjacency: Vec<BTreeSet<usize>>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawCharacterNetwork {
    names: Vec<String>,
    adjacency: Vec<BTreeSet<usize>>,
}

impl TryFrom<RawCharacterNetwork> for CharacterNetwork {
    type Error = GraphError;

    fn try_from(raw: RawCharacterNetwork) -> Result<Self, Self::Error> {
        let len = raw.names.len();
        GraphError::check_len("adjacency", len, raw.adjacency.len())?;

        let mut index = HashMap::with_capacity(len);
        for (idx, name) in raw.names.iter().enumerate() {
            if index.insert(name.clone(), idx).is_some() {
                return Err(GraphError::DuplicateNode(name.clone()));
            }
        }

        for (a, neighbours) in raw.adjacency.iter().enumerate() {
            for &b in neighbours {
                GraphError::check_index("adjacency", b, len)?;
                if a == b {
                    return Err(GraphError::SelfLoop(a));
                }
                if !raw.adjacency[b].contains(&a) {
                    return Err(GraphError::Unmirrored(a, b));
                }
            }
        }

        Ok(Self {
            names: raw.names,
            adjacency: raw.adjacency,
            index,
        })
    }
}

impl CharacterNetwork {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the network from the narrative graph and its stories.
    ///
    /// Every character node of the graph becomes a network node, including
    /// characters outside any story. Each story's characters form a clique.
    pub fn build(graph: &NarrativeGraph, stories: &[Story]) -> Self {
        let mut network = Self::new();

        for node in graph.nodes_of_type(ElementType::Character) {
            network.add_character(&node.element.text);
        }

        for story in stories {
            let characters: Vec<&str> = story.characters().collect();
            for i in 0..characters.len() {
                for j in (i + 1)..characters.len() {
                    network.connect(characters[i], characters[j]);
                }
            }
        }

        tracing::debug!(
            characters = network.node_count(),
            edges = network.edge_count(),
            "built character network"
        );
        network
    }

    /// Add a character if not yet present. Returns its index.
    pub fn add_character(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.adjacency.push(BTreeSet::new());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Connect two characters. Identical names never form a self-loop.
    pub fn connect(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        let a = self.add_character(a);
        let b = self.add_character(b);
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    fn name_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index(name).is_some()
    }

    /// Character names in first-appearance order.
    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.name_index(a), self.name_index(b)) {
            (Some(a), Some(b)) => self.adjacency[a].contains(&b),
            _ => false,
        }
    }

    /// Neighbours of a character in first-appearance order.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        self.name_index(name)
            .map(|idx| {
                self.adjacency[idx]
                    .iter()
                    .map(|&n| self.names[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Each undirected edge once, as `(earlier, later)` by first appearance.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |&&b| a < b)
                    .map(move |&b| (self.names[a].as_str(), self.names[b].as_str()))
            })
            .collect()
    }
}
