use crate::application::http::{recipe::router::RecipeApiDoc, whatsapp::router::WhatsappApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PantryVision Chef API"
    ),
    paths(crate::application::http::health::health_check),
    nest(
        (path = "/api", api = RecipeApiDoc),
        (path = "/api", api = WhatsappApiDoc),
    )
)]
pub struct ApiDoc;
