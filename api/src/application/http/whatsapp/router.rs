use super::handlers::receive_message::{__path_receive_message, receive_message};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(receive_message))]
pub struct WhatsappApiDoc;

pub fn whatsapp_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/whatsapp", root_path),
        post(receive_message),
    )
}
