use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const IMAGE_REQUIRED_MESSAGE: &str = "Image file is required.";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "Image file is too large.";
pub const UNSUPPORTED_IMAGE_MESSAGE: &str = "Only image files are supported right now.";

/// Multipart body of the upload endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRecipesForm {
    /// Photo of the leftovers
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Checks an uploaded `image` field before it is sent to the model.
///
/// A missing content type and `application/octet-stream` are accepted since
/// some clients do not label file parts.
pub fn validate_image_field(content_type: Option<&str>, data: &[u8]) -> Result<(), ApiError> {
    if data.is_empty() {
        return Err(ApiError::BadRequest(IMAGE_REQUIRED_MESSAGE.to_string()));
    }

    if data.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::BadRequest(IMAGE_TOO_LARGE_MESSAGE.to_string()));
    }

    match content_type.map(|c| c.trim().to_ascii_lowercase()) {
        Some(c) if !c.starts_with("image/") && c != "application/octet-stream" => Err(
            ApiError::BadRequest(UNSUPPORTED_IMAGE_MESSAGE.to_string()),
        ),
        _ => Ok(()),
    }
}
