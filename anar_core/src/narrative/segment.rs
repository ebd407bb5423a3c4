//! Frame-bounded story segmentation.

use serde::{Deserialize, Serialize};

use super::{ElementType, NarrativeGraph};

/// An element of a story, without its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryElement {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub text: String,
}

/// A nested story opened by a frame marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub frame_marker: String,
    /// Elements following the frame marker, in narrative order.
    pub elements: Vec<StoryElement>,
}

impl Story {
    /// Character texts in the story, in order.
    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter(|e| e.element_type == ElementType::Character)
            .map(|e| e.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Carve one story out of the graph per frame node.
///
/// From each frame node the walk follows the first successor, collecting
/// non-frame nodes, and stops at the next frame node or the end of the path.
/// Stories come out in frame-node insertion order. A walk never takes more
/// steps than the graph has nodes.
pub fn segment_stories(graph: &NarrativeGraph) -> Vec<Story> {
    let stories: Vec<Story> = graph
        .frame_nodes()
        .map(|frame| {
            let mut elements = Vec::new();
            let mut steps = 0;
            let mut current = graph.first_successor(&frame.id);

            while let Some(node) = current {
                if node.element.is_frame() || steps >= graph.node_count() {
                    break;
                }
                elements.push(StoryElement {
                    element_type: node.element.element_type,
                    text: node.element.text.clone(),
                });
                steps += 1;
                current = graph.first_successor(&node.id);
            }

            Story {
                frame_marker: frame.element.text.clone(),
                elements,
            }
        })
        .collect();

    tracing::debug!(stories = stories.len(), "segmented stories");
    stories
}
