use std::time::Duration;

use bytes::BytesMut;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::instrument;
use url::Url;

use crate::domain::{
    common::entities::app_errors::CoreError,
    messaging::{
        ports::MediaFetcher,
        value_objects::{MediaContent, MediaCredentials},
    },
};

pub const MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Downloads inbound message attachments over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpMediaFetcher {
    client: Client,
}

impl HttpMediaFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build media HTTP client: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self { client })
    }
}

impl MediaFetcher for HttpMediaFetcher {
    #[instrument(skip(self, credentials))]
    async fn fetch_media(
        &self,
        url: String,
        credentials: Option<MediaCredentials>,
    ) -> Result<MediaContent, CoreError> {
        let url = Url::parse(&url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| CoreError::Invalid("media URL is not an http(s) URL".to_string()))?;

        let mut request = self.client.get(url);
        if let Some(credentials) = credentials {
            request = request.basic_auth(credentials.account_sid, Some(credentials.auth_token));
        }

        let mut response = request.send().await.map_err(|e| {
            tracing::error!("Media download failed: {}", e);
            if e.is_timeout() {
                CoreError::Timeout
            } else {
                CoreError::ExternalServiceError(format!("media download failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Media host returned an error");
            return Err(CoreError::ExternalServiceError(format!(
                "media host returned {}",
                response.status()
            )));
        }

        if response
            .content_length()
            .is_some_and(|len| len as usize > MAX_MEDIA_SIZE)
        {
            return Err(CoreError::Invalid("media is too large".to_string()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.split(';').next().unwrap_or(s).trim().to_string());

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            tracing::error!("Failed to read media body: {}", e);
            if e.is_timeout() {
                CoreError::Timeout
            } else {
                CoreError::ExternalServiceError(format!("failed to read media body: {}", e))
            }
        })? {
            if buffer.len() + chunk.len() > MAX_MEDIA_SIZE {
                tracing::warn!(read = buffer.len(), "Media body exceeds size limit");
                return Err(CoreError::Invalid("media is too large".to_string()));
            }
            buffer.extend_from_slice(&chunk);
        }

        if buffer.is_empty() {
            return Err(CoreError::Invalid("media is empty".to_string()));
        }
        let data = buffer.freeze();

        tracing::info!(size = data.len(), content_type = ?content_type, "Downloaded inbound media");

        Ok(MediaContent { data, content_type })
    }
}
