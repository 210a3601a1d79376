use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{entities::AgentResponse, value_objects::AnalyzeImageInput},
};

/// Client for a hosted multimodal model
#[cfg_attr(test, mockall::automock)]
pub trait VisionModelClient: Send + Sync {
    /// Sends one prompt plus image and returns the model's raw text reply.
    fn generate_with_image(
        &self,
        prompt: String,
        image: AnalyzeImageInput,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for the recipe agent
#[cfg_attr(test, mockall::automock)]
pub trait RecipeAgentService: Send + Sync {
    /// Runs one analysis and surfaces any failure to the caller.
    fn run_vision_agent(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AgentResponse, CoreError>> + Send;

    /// Runs one analysis and substitutes the fallback response on failure.
    fn run_vision_agent_or_fallback(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = AgentResponse> + Send;
}
