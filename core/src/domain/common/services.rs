use crate::domain::{
    common::PantryVisionConfig, messaging::ports::MediaFetcher, recipe::ports::VisionModelClient,
};

/// Stateless service wiring the recipe agent to its outbound adapters.
#[derive(Clone)]
pub struct Service<LLM, MF>
where
    LLM: VisionModelClient,
    MF: MediaFetcher,
{
    pub(crate) vision_client: LLM,
    pub(crate) media_fetcher: MF,
    pub(crate) config: PantryVisionConfig,
}

impl<LLM, MF> Service<LLM, MF>
where
    LLM: VisionModelClient,
    MF: MediaFetcher,
{
    pub fn new(vision_client: LLM, media_fetcher: MF, config: PantryVisionConfig) -> Self {
        Self {
            vision_client,
            media_fetcher,
            config,
        }
    }
}
