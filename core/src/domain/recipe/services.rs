use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    messaging::ports::MediaFetcher,
    recipe::{
        entities::AgentResponse,
        fallback::build_fallback_response,
        ports::{RecipeAgentService, VisionModelClient},
        prompt::build_vision_prompt,
        schema::recipe_response_schema,
        validator::{extract_structured_payload, validate},
        value_objects::AnalyzeImageInput,
    },
};

impl<LLM, MF> RecipeAgentService for Service<LLM, MF>
where
    LLM: VisionModelClient,
    MF: MediaFetcher,
{
    #[instrument(skip(self, input), fields(mime_type = %input.mime_type))]
    async fn run_vision_agent(&self, input: AnalyzeImageInput) -> Result<AgentResponse, CoreError> {
        let reply = self
            .vision_client
            .generate_with_image(build_vision_prompt(), input, recipe_response_schema())
            .await?;

        let raw = extract_structured_payload(&reply).inspect_err(|e| {
            tracing::warn!(error = %e, reply_len = reply.len(), "Unusable vision model reply");
        })?;

        let response = validate(&raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Vision model reply failed validation");
        })?;

        tracing::info!(
            identified_items = response.identified_items.len(),
            recipes = response.recipes.len(),
            "Vision agent produced recipes"
        );

        Ok(response)
    }

    async fn run_vision_agent_or_fallback(&self, input: AnalyzeImageInput) -> AgentResponse {
        match self.run_vision_agent(input).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Vision agent failed, using fallback recipes");
                build_fallback_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::PantryVisionConfig,
        messaging::ports::MockMediaFetcher,
        recipe::{errors::ValidationError, fallback::fallback_titles, ports::MockVisionModelClient},
    };

    fn config() -> PantryVisionConfig {
        PantryVisionConfig {
            llm: Default::default(),
            messaging: Default::default(),
            app_base_url: "https://pantry.example".to_string(),
        }
    }

    fn service_replying(
        reply: Result<String, CoreError>,
    ) -> Service<MockVisionModelClient, MockMediaFetcher> {
        let mut vision_client = MockVisionModelClient::new();
        vision_client
            .expect_generate_with_image()
            .times(1)
            .returning(move |_, _, _| {
                let reply = reply.clone();
                Box::pin(async move { reply })
            });

        Service::new(vision_client, MockMediaFetcher::new(), config())
    }

    fn input() -> AnalyzeImageInput {
        AnalyzeImageInput::new("aGVsbG8=".to_string(), None)
    }

    fn three_recipes() -> String {
        let recipe = |title: &str| {
            json!({
                "title": title,
                "description": "Tasty.",
                "ingredients": ["potato", "onion"],
                "steps": ["Chop", "Cook"]
            })
        };
        json!({
            "identifiedItems": ["potato", "onion"],
            "recipes": [recipe("Hash"), recipe("Soup"), recipe("Gratin")],
            "confidenceNotes": []
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_run_vision_agent_returns_validated_response() {
        let service = service_replying(Ok(three_recipes()));

        let response = service.run_vision_agent(input()).await.unwrap();
        assert_eq!(response.recipes.len(), 3);
        assert_eq!(response.identified_items, vec!["potato", "onion"]);
    }

    #[tokio::test]
    async fn test_run_vision_agent_tolerates_prose_around_payload() {
        let reply = format!("Here you go!\n{}\nBon appetit!", three_recipes());
        let service = service_replying(Ok(reply));

        let response = service.run_vision_agent(input()).await.unwrap();
        assert_eq!(response.recipes[2].title, "Gratin");
    }

    #[tokio::test]
    async fn test_run_vision_agent_surfaces_validation_error() {
        let service = service_replying(Ok("I only see an empty plate.".to_string()));

        let error = service.run_vision_agent(input()).await.unwrap_err();
        assert_eq!(
            error,
            CoreError::Validation(ValidationError::NoStructuredPayload)
        );
    }

    #[tokio::test]
    async fn test_run_vision_agent_surfaces_transport_error() {
        let service = service_replying(Err(CoreError::Timeout));

        let error = service.run_vision_agent(input()).await.unwrap_err();
        assert!(error.is_transport());
    }

    #[tokio::test]
    async fn test_fallback_adapter_substitutes_on_failure() {
        let service = service_replying(Ok(json!({ "recipes": [] }).to_string()));

        let response = service.run_vision_agent_or_fallback(input()).await;
        let titles: Vec<_> = response.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, fallback_titles().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_fallback_adapter_passes_success_through() {
        let service = service_replying(Ok(three_recipes()));

        let response = service.run_vision_agent_or_fallback(input()).await;
        assert_eq!(response.recipes[0].title, "Hash");
    }
}
