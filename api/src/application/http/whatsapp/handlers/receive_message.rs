use axum::{
    extract::{OriginalUri, State},
    http::HeaderMap,
};
use bytes::Bytes;
use pantryvision_core::domain::messaging::{
    ports::MessagingService, value_objects::InboundMessage,
};
use tracing::warn;

use crate::application::http::{
    server::{api_entities::response::Twiml, app_state::AppState},
    whatsapp::validators::{WebhookError, WhatsappWebhookForm, verify_webhook_signature},
};

#[utoipa::path(
    post,
    path = "/whatsapp",
    tag = "whatsapp",
    summary = "Twilio WhatsApp webhook",
    description = "Replies to an inbound WhatsApp message with recipe suggestions for the attached photo",
    request_body(content = WhatsappWebhookForm, content_type = "application/x-www-form-urlencoded"),
    params(
        ("X-Twilio-Signature" = Option<String>, Header, description = "Required when a Twilio auth token is configured"),
    ),
    responses(
        (status = 200, description = "TwiML reply", content_type = "text/xml", body = String),
        (status = 400, description = "Malformed request or missing sender"),
        (status = 403, description = "Invalid signature"),
        (status = 500, description = "Unexpected server failure")
    ),
)]
pub async fn receive_message(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Twiml, WebhookError> {
    let params: Vec<(String, String)> = serde_urlencoded::from_bytes(&body).map_err(|e| {
        warn!("Failed to decode webhook form: {}", e);
        WebhookError::MalformedPayload
    })?;

    verify_webhook_signature(&state.args, &uri, &headers, &params)?;

    let message = InboundMessage::from_params(&params);

    let reply = state.service.reply_to_inbound(message).await?;

    Ok(Twiml(reply.into_twiml()))
}
