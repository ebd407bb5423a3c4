//! Narrative elements - classified, position-tagged text spans.

use anar_rules::{PatternMatcher, RuleCategory};
use serde::{Deserialize, Serialize};

use crate::input::FrameMarker;

/// Kind of narrative element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Character,
    Event,
    Frame,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Character => "character",
            ElementType::Event => "event",
            ElementType::Frame => "frame",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified span of the source text. Identity is `(text, position)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrativeElement {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub text: String,
    /// Character offset into the normalized text.
    pub position: usize,
}

impl NarrativeElement {
    pub fn new(element_type: ElementType, text: impl Into<String>, position: usize) -> Self {
        Self {
            element_type,
            text: text.into(),
            position,
        }
    }

    pub fn character(text: impl Into<String>, position: usize) -> Self {
        Self::new(ElementType::Character, text, position)
    }

    pub fn event(text: impl Into<String>, position: usize) -> Self {
        Self::new(ElementType::Event, text, position)
    }

    pub fn frame(text: impl Into<String>, position: usize) -> Self {
        Self::new(ElementType::Frame, text, position)
    }

    pub fn is_frame(&self) -> bool {
        self.element_type == ElementType::Frame
    }
}

/// Extract character and event elements, merge in the frame markers and
/// sort everything by position.
///
/// The sort is stable: at equal positions, rule matches keep rule
/// declaration order and frame markers come after them.
pub fn extract_elements(
    text: &str,
    frame_markers: &[FrameMarker],
    matcher: &PatternMatcher,
) -> Vec<NarrativeElement> {
    let mut elements: Vec<NarrativeElement> = matcher
        .find_categories(text, &[RuleCategory::Character, RuleCategory::Event])
        .into_iter()
        .filter_map(|found| {
            let element_type = match found.category {
                RuleCategory::Character => ElementType::Character,
                RuleCategory::Event => ElementType::Event,
                _ => return None,
            };
            Some(NarrativeElement::new(element_type, found.text, found.position))
        })
        .collect();

    elements.extend(
        frame_markers
            .iter()
            .map(|m| NarrativeElement::frame(m.marker.clone(), m.position)),
    );

    elements.sort_by_key(|e| e.position);
    elements
}
