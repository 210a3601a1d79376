use super::handlers::generate_recipes::{__path_generate_recipes, generate_recipes};
use super::validators::MAX_IMAGE_SIZE;
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

// room for multipart framing around the image
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(generate_recipes))]
pub struct RecipeApiDoc;

pub fn recipe_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/generate", root_path),
            post(generate_recipes),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
}
