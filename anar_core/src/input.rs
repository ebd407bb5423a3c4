//! The normalized input consumed by every analysis stage.

use anar_rules::{PatternMatcher, RuleCategory};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;

/// A frame marker and its character offset in the normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMarker {
    pub marker: String,
    pub position: usize,
}

impl FrameMarker {
    pub fn new(marker: impl Into<String>, position: usize) -> Self {
        Self {
            marker: marker.into(),
            position,
        }
    }
}

/// A cultural marker detected by a `cultural` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalMarker {
    /// Rule label, e.g. `historical_era`.
    pub kind: String,
    pub text: String,
    pub position: usize,
}

/// Normalized text together with its frame markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProcessedText {
    pub normalized_text: String,

    #[serde(default)]
    pub tokens: Vec<String>,

    /// Sorted ascending by position.
    pub frame_markers: Vec<FrameMarker>,

    #[serde(default)]
    pub cultural_markers: Vec<CulturalMarker>,
}

impl ProcessedText {
    pub fn new(normalized_text: impl Into<String>, frame_markers: Vec<FrameMarker>) -> Self {
        Self {
            normalized_text: normalized_text.into(),
            frame_markers,
            ..Self::default()
        }
    }

    /// Build the input record from already-normalized text.
    ///
    /// Frame markers come from the matcher's `frame` rules and cultural
    /// markers from its `cultural` rules. Tokens are whitespace-delimited.
    pub fn detect(text: &str, matcher: &PatternMatcher) -> Self {
        let mut frame_markers = Vec::new();
        let mut cultural_markers = Vec::new();

        for found in matcher.find_categories(text, &[RuleCategory::Frame, RuleCategory::Cultural]) {
            match found.category {
                RuleCategory::Frame => {
                    frame_markers.push(FrameMarker::new(found.text, found.position))
                }
                _ => cultural_markers.push(CulturalMarker {
                    kind: found.label.unwrap_or_else(|| RuleCategory::Cultural.to_string()),
                    text: found.text,
                    position: found.position,
                }),
            }
        }

        tracing::debug!(
            frames = frame_markers.len(),
            cultural = cultural_markers.len(),
            "detected markers"
        );

        Self {
            normalized_text: text.to_string(),
            tokens: text.split_whitespace().map(str::to_string).collect(),
            frame_markers,
            cultural_markers,
        }
    }

    /// Parse the input record from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(&value)
    }

    /// Validate and extract the input record from a loose JSON value.
    ///
    /// `normalized_text` and `frame_markers` are required; frame markers are
    /// `[marker, position]` pairs. `tokens` and `cultural_markers` are optional.
    pub fn from_value(value: &Value) -> Result<Self, AnalysisError> {
        let object = value.as_object().ok_or(AnalysisError::WrongShape {
            field: "input",
            expected: "an object",
        })?;

        let normalized_text = object
            .get("normalized_text")
            .ok_or(AnalysisError::MissingField {
                field: "normalized_text",
            })?
            .as_str()
            .ok_or(AnalysisError::WrongShape {
                field: "normalized_text",
                expected: "a string",
            })?
            .to_string();

        let frame_markers = object
            .get("frame_markers")
            .ok_or(AnalysisError::MissingField {
                field: "frame_markers",
            })?
            .as_array()
            .ok_or(AnalysisError::WrongShape {
                field: "frame_markers",
                expected: "an array",
            })?
            .iter()
            .map(parse_frame_marker)
            .collect::<Result<Vec<_>, _>>()?;

        let tokens = match object.get("tokens") {
            None | Some(Value::Null) => Vec::new(),
            Some(tokens) => tokens
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|t| t.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or(AnalysisError::WrongShape {
                    field: "tokens",
                    expected: "an array of strings",
                })?,
        };

        let cultural_markers = match object.get("cultural_markers") {
            None | Some(Value::Null) => Vec::new(),
            Some(markers) => serde_json::from_value(markers.clone()).map_err(|_| {
                AnalysisError::WrongShape {
                    field: "cultural_markers",
                    expected: "an array of {kind, text, position} objects",
                }
            })?,
        };

        Ok(Self {
            normalized_text,
            tokens,
            frame_markers,
            cultural_markers,
        })
    }
}

fn parse_frame_marker(value: &Value) -> Result<FrameMarker, AnalysisError> {
    const SHAPE: AnalysisError = AnalysisError::WrongShape {
        field: "frame_markers",
        expected: "an array of [marker, position] pairs",
    };

    match value.as_array().map(Vec::as_slice) {
        Some([marker, position]) => {
            let marker = marker.as_str().ok_or(SHAPE)?;
            let position = position
                .as_u64()
                .and_then(|p| usize::try_from(p).ok())
                .ok_or(SHAPE)?;
            Ok(FrameMarker::new(marker, position))
        }
        _ => Err(SHAPE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anar_rules::default_rules;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        let input = ProcessedText::from_value(&json!({
            "normalized_text": "قال الملك شهريار",
            "frame_markers": [["قال الملك", 0]],
            "tokens": ["قال", "الملك", "شهريار"]
        }))
        .unwrap();

        assert_eq!(input.normalized_text, "قال الملك شهريار");
        assert_eq!(input.frame_markers, vec![FrameMarker::new("قال الملك", 0)]);
        assert_eq!(input.tokens.len(), 3);
        assert!(input.cultural_markers.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let err = ProcessedText::from_value(&json!({ "frame_markers": [] })).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingField {
                field: "normalized_text"
            }
        ));

        let err = ProcessedText::from_value(&json!({ "normalized_text": "" })).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingField {
                field: "frame_markers"
            }
        ));
    }

    #[test]
    fn test_wrong_shapes() {
        let cases = [
            json!("text"),
            json!({ "normalized_text": 3, "frame_markers": [] }),
            json!({ "normalized_text": "", "frame_markers": {} }),
            json!({ "normalized_text": "", "frame_markers": [["قال الملك"]] }),
            json!({ "normalized_text": "", "frame_markers": [["قال الملك", -1]] }),
            json!({ "normalized_text": "", "frame_markers": [[0, "قال الملك"]] }),
            json!({ "normalized_text": "", "frame_markers": [], "tokens": [1] }),
        ];

        for case in cases {
            let result = ProcessedText::from_value(&case);
            assert!(
                matches!(result, Err(AnalysisError::WrongShape { .. })),
                "{case}"
            );
        }
    }

    #[test]
    fn test_from_json_str() {
        let input = ProcessedText::from_json_str(r#"{"normalized_text": "", "frame_markers": []}"#)
            .unwrap();
        assert_eq!(input, ProcessedText::default());

        assert!(matches!(
            ProcessedText::from_json_str("{not json"),
            Err(AnalysisError::Json(_))
        ));
    }

    #[test]
    fn test_detect_frame_markers() {
        let matcher = PatternMatcher::new(&default_rules()).unwrap();
        let input = ProcessedText::detect("قالت شهرزاد: وحدثني أيها الملك السعيد", &matcher);

        assert_eq!(input.frame_markers.len(), 2);
        assert_eq!(input.frame_markers[0], FrameMarker::new("قالت شهرزاد", 0));
        assert_eq!(input.frame_markers[1].marker, "وحدثني أيها الملك");
        assert_eq!(input.tokens.len(), 6);
    }

    #[test]
    fn test_detect_cultural_markers() {
        let matcher = PatternMatcher::new(&default_rules()).unwrap();
        let input = ProcessedText::detect("وكان في عهد هارون الرشيد تاجر ضرب في الأرض", &matcher);

        assert!(input
            .cultural_markers
            .iter()
            .any(|m| m.kind == "historical_era"));
        assert!(input
            .cultural_markers
            .iter()
            .any(|m| m.kind == "social_custom"));
        assert!(input.frame_markers.is_empty());
    }
}
