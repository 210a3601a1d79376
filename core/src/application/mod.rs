use crate::{
    domain::common::{PantryVisionConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::OpenAIVisionClient, media::HttpMediaFetcher},
};

pub type PantryVisionService = Service<OpenAIVisionClient, HttpMediaFetcher>;

pub fn create_service(config: PantryVisionConfig) -> Result<PantryVisionService, CoreError> {
    let vision_client = OpenAIVisionClient::new(&config.llm)?;
    let media_fetcher = HttpMediaFetcher::new(config.messaging.media_timeout)?;

    tracing::info!(
        model = %config.llm.model,
        vision_configured = config.llm.api_key.is_some(),
        signature_checks = config.messaging.auth_token.is_some(),
        "PantryVision service created"
    );

    Ok(Service::new(vision_client, media_fetcher, config))
}
