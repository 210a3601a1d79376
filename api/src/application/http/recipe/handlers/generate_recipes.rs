use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use bytes::Bytes;
use pantryvision_core::domain::{
    channel::format_for_web,
    recipe::{entities::AgentResponse, ports::RecipeAgentService, value_objects::AnalyzeImageInput},
};
use tracing::{error, warn};

use crate::application::http::{
    recipe::validators::{
        GenerateRecipesForm, IMAGE_REQUIRED_MESSAGE, IMAGE_TOO_LARGE_MESSAGE,
        validate_image_field,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, GENERATION_FAILED_MESSAGE},
            response::Response,
        },
        app_state::AppState,
    },
};

fn multipart_error(e: MultipartError) -> ApiError {
    warn!("Failed to read multipart body: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(IMAGE_TOO_LARGE_MESSAGE.to_string())
    } else {
        ApiError::BadRequest(IMAGE_REQUIRED_MESSAGE.to_string())
    }
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "recipes",
    summary = "Suggest recipes from a photo",
    description = "Identifies the food in an uploaded photo and suggests three recipes",
    request_body(content = GenerateRecipesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AgentResponse),
        (status = 400, description = "Missing or invalid image", body = ApiErrorResponse),
        (status = 500, description = "Recipe generation failed", body = ApiErrorResponse)
    ),
)]
pub async fn generate_recipes(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<AgentResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected upload without a multipart body: {}", e);
        ApiError::BadRequest(IMAGE_REQUIRED_MESSAGE.to_string())
    })?;

    let mut image: Option<(Bytes, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") || image.is_some() {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        image = Some((data, content_type));
    }

    let (data, content_type) =
        image.ok_or_else(|| ApiError::BadRequest(IMAGE_REQUIRED_MESSAGE.to_string()))?;

    validate_image_field(content_type.as_deref(), &data)?;

    let response = state
        .service
        .run_vision_agent(AnalyzeImageInput::from_bytes(&data, content_type))
        .await
        .map_err(|e| {
            error!(error = %e, "Recipe generation failed");
            ApiError::InternalServerError(GENERATION_FAILED_MESSAGE.to_string())
        })?;

    Ok(Response::OK(format_for_web(response)))
}
