//! Structured-output schema for classification responses.
//!
//! Sent alongside every generation request so the remote service constrains
//! its output to an array of fully-populated candidate objects. Field names
//! here must match the serde wire names on
//! [`ClassificationResult`](taxon_core::ClassificationResult).

use serde_json::{json, Value as JsonValue};

/// Response schema: an array of candidate objects with all five fields required.
pub fn classification_schema() -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "code": {
                    "type": "STRING",
                    "description": "The HSN or SAC code."
                },
                "description": {
                    "type": "STRING",
                    "description": "The official description of the HSN or SAC code."
                },
                "category": {
                    "type": "STRING",
                    "enum": ["Goods", "Service"],
                    "description": "The category, either 'Goods' or 'Service'."
                },
                "gstRate": {
                    "type": "NUMBER",
                    "description": "The applicable GST rate in percentage (e.g., 18 for 18%)."
                },
                "reason": {
                    "type": "STRING",
                    "description": "A brief explanation of why this code is a relevant match for the user's description."
                }
            },
            "required": ["code", "description", "category", "gstRate", "reason"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_an_array_of_objects() {
        let schema = classification_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
    }

    #[test]
    fn test_schema_requires_all_five_fields() {
        let schema = classification_schema();
        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["code", "description", "category", "gstRate", "reason"]
        );
    }

    #[test]
    fn test_schema_category_is_a_closed_enum() {
        let schema = classification_schema();
        let variants = schema["items"]["properties"]["category"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants.contains(&json!("Goods")));
        assert!(variants.contains(&json!("Service")));
    }
}
