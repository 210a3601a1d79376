use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical result of one image analysis, consumed by every channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub identified_items: Vec<String>,
    /// Best suggestion first. Never empty.
    pub recipes: Vec<Recipe>,
    pub confidence_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}
