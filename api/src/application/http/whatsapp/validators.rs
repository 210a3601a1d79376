use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use pantryvision_core::domain::{
    common::entities::app_errors::CoreError, messaging::signature::validate_signature,
};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::args::Args;

pub const TWILIO_SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Form fields Twilio posts for an inbound WhatsApp message
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct WhatsappWebhookForm {
    /// Requests without a sender are rejected with 400
    #[schema(example = "whatsapp:+15550001111")]
    pub from: Option<String>,
    /// Missing means no attachments
    #[schema(example = "1")]
    pub num_media: Option<String>,
    #[serde(rename = "MediaUrl0")]
    #[schema(example = "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages/MM123/Media/ME123")]
    pub media_url0: Option<String>,
    #[serde(rename = "MediaContentType0")]
    pub media_content_type0: Option<String>,
}

/// Webhook failures. Bodies are plain text so Twilio logs stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed request.")]
    MalformedPayload,

    #[error("Missing sender information.")]
    MissingSender,

    #[error("Internal server error.")]
    Internal,
}

impl From<CoreError> for WebhookError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Invalid(_) => WebhookError::MissingSender,
            other => {
                tracing::error!(error = %other, "Unexpected messaging failure");
                WebhookError::Internal
            }
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match self {
            WebhookError::InvalidSignature => StatusCode::FORBIDDEN,
            WebhookError::MalformedPayload | WebhookError::MissingSender => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// URL Twilio signed: the configured webhook URL, or the public base URL
/// joined with the request path and query.
pub fn signed_url(args: &Args, uri: &Uri) -> String {
    if let Some(webhook_url) = args.twilio.webhook_url.as_deref().map(str::trim)
        && !webhook_url.is_empty()
    {
        return webhook_url.to_string();
    }

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    match url::Url::parse(&args.app_base_url) {
        Ok(base) => format!(
            "{}://{}{}",
            base.scheme(),
            base.host_str().map_or_else(String::new, |host| match base.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }),
            path_and_query
        ),
        Err(_) => format!(
            "{}{}",
            args.app_base_url.trim_end_matches('/'),
            path_and_query
        ),
    }
}

/// Verifies `X-Twilio-Signature` when an auth token is configured.
pub fn verify_webhook_signature(
    args: &Args,
    uri: &Uri,
    headers: &HeaderMap,
    params: &[(String, String)],
) -> Result<(), WebhookError> {
    let Some(auth_token) = args
        .twilio
        .auth_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    else {
        return Ok(());
    };

    let signature = headers
        .get(TWILIO_SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let url = signed_url(args, uri);
    if validate_signature(auth_token, signature, &url, params) {
        Ok(())
    } else {
        tracing::warn!(url = %url, "Rejected webhook with invalid signature");
        Err(WebhookError::InvalidSignature)
    }
}
