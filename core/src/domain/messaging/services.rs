use tracing::instrument;

use crate::domain::{
    channel::whatsapp::{
        ChannelMessage, IMAGE_NOT_FOUND_MESSAGE, PHOTO_PROMPT_MESSAGE,
        format_for_messaging_channel,
    },
    common::{entities::app_errors::CoreError, services::Service},
    messaging::{
        ports::{MediaFetcher, MessagingService},
        value_objects::{InboundMessage, MediaCredentials},
    },
    recipe::{
        entities::AgentResponse,
        fallback::build_fallback_response,
        ports::{RecipeAgentService, VisionModelClient},
        value_objects::AnalyzeImageInput,
    },
};

impl<LLM, MF> Service<LLM, MF>
where
    LLM: VisionModelClient,
    MF: MediaFetcher,
{
    fn media_credentials(&self) -> Option<MediaCredentials> {
        match (
            &self.config.messaging.account_sid,
            &self.config.messaging.auth_token,
        ) {
            (Some(account_sid), Some(auth_token)) => Some(MediaCredentials {
                account_sid: account_sid.clone(),
                auth_token: auth_token.clone(),
            }),
            _ => None,
        }
    }

    async fn recipes_for_media(
        &self,
        media_url: String,
        declared_type: Option<String>,
    ) -> AgentResponse {
        match self
            .media_fetcher
            .fetch_media(media_url, self.media_credentials())
            .await
        {
            Ok(media) => {
                let mime_type = media.content_type.or(declared_type);
                let image = AnalyzeImageInput::from_bytes(&media.data, mime_type);
                self.run_vision_agent_or_fallback(image).await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to download inbound media, using fallback recipes");
                build_fallback_response()
            }
        }
    }
}

impl<LLM, MF> MessagingService for Service<LLM, MF>
where
    LLM: VisionModelClient,
    MF: MediaFetcher,
{
    #[instrument(skip(self, message), fields(num_media = ?message.num_media))]
    async fn reply_to_inbound(&self, message: InboundMessage) -> Result<ChannelMessage, CoreError> {
        if message.from.is_none() {
            return Err(CoreError::Invalid("missing sender".to_string()));
        }

        if message.num_media.is_some_and(|count| count < 1) {
            return Ok(ChannelMessage::from_text(PHOTO_PROMPT_MESSAGE));
        }

        let Some(media_url) = message.media_url else {
            tracing::warn!("Inbound message reported media without a media URL");
            return Ok(ChannelMessage::from_text(IMAGE_NOT_FOUND_MESSAGE));
        };

        // Twilio drops replies that take longer than its webhook timeout.
        let deadline = self.config.messaging.reply_deadline;
        let response = match tokio::time::timeout(
            deadline,
            self.recipes_for_media(media_url, message.media_content_type),
        )
        .await
        {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(?deadline, "Reply deadline elapsed, using fallback recipes");
                build_fallback_response()
            }
        };

        Ok(format_for_messaging_channel(
            &response,
            &self.config.app_base_url,
        ))
    }
}
