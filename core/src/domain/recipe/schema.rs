use serde_json::json;

/// Returns the JSON schema requested from the vision model
pub fn recipe_response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "identifiedItems": {
                "type": "array",
                "items": { "type": "string" }
            },
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "ingredients": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "steps": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["title", "description", "ingredients", "steps"],
                    "additionalProperties": false
                }
            },
            "confidenceNotes": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["identifiedItems", "recipes", "confidenceNotes"],
        "additionalProperties": false
    })
}
