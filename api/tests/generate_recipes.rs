mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pantryvision_core::domain::recipe::entities::AgentResponse;
use serde_json::{Value, json};
use test_context::test_context;

use common::{JPEG_BYTES, ProseUpstream, RecipeUpstream, UNREACHABLE_URL, test_args, test_server};

fn jpeg_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(JPEG_BYTES.to_vec())
            .file_name("leftovers.jpg")
            .mime_type("image/jpeg"),
    )
}

#[test_context(RecipeUpstream)]
#[tokio::test]
async fn test_upload_returns_three_recipes(upstream: &mut RecipeUpstream) {
    let server = test_server(test_args(&upstream.0.base_url, None));

    let response = server.post("/api/generate").multipart(jpeg_form()).await;

    response.assert_status(StatusCode::OK);
    let body: AgentResponse = response.json();
    assert_eq!(body.recipes.len(), 3);
    assert_eq!(body.recipes[0].title, "Chicken Fried Rice");
    assert_eq!(body.identified_items, vec!["chicken", "rice", "peas"]);
}

#[test_context(RecipeUpstream)]
#[tokio::test]
async fn test_upload_serializes_camel_case_keys(upstream: &mut RecipeUpstream) {
    let server = test_server(test_args(&upstream.0.base_url, None));

    let response = server.post("/api/generate").multipart(jpeg_form()).await;

    let body: Value = response.json();
    assert!(body.get("identifiedItems").is_some());
    assert!(body.get("confidenceNotes").is_some());
    assert_eq!(body["recipes"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_upload_without_image_is_rejected() {
    let server = test_server(test_args(UNREACHABLE_URL, None));

    let form = MultipartForm::new().add_text("note", "no photo today");
    let response = server.post("/api/generate").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Image file is required." }));
}

#[tokio::test]
async fn test_upload_with_non_image_file_is_rejected() {
    let server = test_server(test_args(UNREACHABLE_URL, None));

    let form = MultipartForm::new().add_part(
        "image",
        Part::text("hello").file_name("notes.txt").mime_type("text/plain"),
    );
    let response = server.post("/api/generate").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Only image files are supported right now." }));
}

#[test_context(ProseUpstream)]
#[tokio::test]
async fn test_unusable_model_reply_surfaces_generic_error(upstream: &mut ProseUpstream) {
    let server = test_server(test_args(&upstream.0.base_url, None));

    let response = server.post("/api/generate").multipart(jpeg_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Failed to generate recipes from the image. Please try again later."
    }));
}

#[tokio::test]
async fn test_unreachable_model_surfaces_generic_error() {
    let server = test_server(test_args(UNREACHABLE_URL, None));

    let response = server.post("/api/generate").multipart(jpeg_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Failed to generate recipes from the image. Please try again later."
    );
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server(test_args(UNREACHABLE_URL, None));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({ "status": "ok" }));
}
