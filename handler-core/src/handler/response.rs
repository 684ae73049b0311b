//! The Handler's structured reply format.

use gemini::Schema;
use serde::{Deserialize, Serialize};

/// A parsed Handler reply: the narrative beat, the choices offered for the
/// next player turn, and whether a dice roll is being requested.
///
/// All three fields are required. A reply missing any of them is rejected
/// as malformed rather than patched with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerResponse {
    pub narrative: String,
    pub choices: Vec<String>,
    #[serde(rename = "awaitsRoll")]
    pub awaits_roll: bool,
}

impl HandlerResponse {
    /// Parse a raw model reply. Whitespace around the JSON is tolerated;
    /// anything else is a parse failure.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.trim())
    }

    /// The response schema sent with every turn request, constraining the
    /// model's output to this shape.
    pub fn schema() -> Schema {
        Schema::object(vec![
            (
                "narrative".to_string(),
                Schema::string().with_description(
                    "The Handler's narrative description of events and the environment.",
                ),
            ),
            (
                "choices".to_string(),
                Schema::array(Schema::string()).with_description(
                    "An array of 3 to 4 distinct, concise choices for the player.",
                ),
            ),
            (
                "awaitsRoll".to_string(),
                Schema::boolean().with_description(
                    "True if the Handler is asking for a dice roll, otherwise false.",
                ),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let raw = r#"
            {
                "narrative": "The door creaks open.",
                "choices": ["Enter.", "Wait.", "Leave."],
                "awaitsRoll": false
            }
        "#;
        let response = HandlerResponse::parse(raw).unwrap();
        assert_eq!(response.narrative, "The door creaks open.");
        assert_eq!(response.choices.len(), 3);
        assert!(!response.awaits_roll);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let raw = r#"{"narrative": "text", "choices": []}"#;
        assert!(HandlerResponse::parse(raw).is_err());
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let raw = r#"{"narrative": "text", "choices": "not a list", "awaitsRoll": false}"#;
        assert!(HandlerResponse::parse(raw).is_err());
    }

    #[test]
    fn test_empty_and_oversized_choice_lists_accepted() {
        let raw = r#"{"narrative": "n", "choices": [], "awaitsRoll": true}"#;
        let response = HandlerResponse::parse(raw).unwrap();
        assert!(response.choices.is_empty());
        assert!(response.awaits_roll);

        let raw = r#"{"narrative": "n", "choices": ["a","b","c","d","e","f"], "awaitsRoll": false}"#;
        let response = HandlerResponse::parse(raw).unwrap();
        assert_eq!(response.choices.len(), 6);
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = HandlerResponse::schema();
        let json = gemini::serialize_schema(&schema);
        let required = json["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["awaitsRoll"]["type"], "BOOLEAN");
    }
}
