#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use axum_test::TestServer;
use pantryvision_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LlmArgs, LogArgs, ServerArgs, TwilioArgs},
};
use serde_json::{Value, json};
use test_context::AsyncTestContext;
use tokio::{net::TcpListener, task::JoinHandle};

pub const AUTH_TOKEN: &str = "twilio-test-token";
pub const ACCOUNT_SID: &str = "AC00000000000000000000000000000000";
pub const WEBHOOK_URL: &str = "https://pantry.example/api/whatsapp";
pub const APP_BASE_URL: &str = "https://pantry.example";
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

pub fn three_recipes_reply() -> String {
    let recipe = |title: &str| {
        json!({
            "title": title,
            "description": format!("{title} from your leftovers."),
            "ingredients": ["chicken", "rice", "peas", "soy sauce"],
            "steps": ["Chop everything", "Cook it together", "Serve hot"]
        })
    };

    json!({
        "identifiedItems": ["chicken", "rice", "peas"],
        "recipes": [
            recipe("Chicken Fried Rice"),
            recipe("Chicken Rice Soup"),
            recipe("Stuffed Peppers")
        ],
        "confidenceNotes": ["The green vegetable might be edamame"]
    })
    .to_string()
}

/// Local stand-in for the vision API and the Twilio media host.
pub struct StubUpstream {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubUpstream {
    pub async fn spawn(reply: String) -> Self {
        let completion = json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": reply },
                "finish_reason": "stop"
            }]
        });

        let app = Router::new()
            .route(
                "/chat/completions",
                post(move |Json(_request): Json<Value>| {
                    let completion = completion.clone();
                    async move { Json(completion) }
                }),
            )
            .route("/media/{media_id}", get(serve_media));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub upstream");
        let addr = listener.local_addr().expect("stub upstream address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub upstream");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn media_url(&self) -> String {
        format!("{}/media/ME123", self.base_url)
    }
}

async fn serve_media(headers: HeaderMap) -> impl IntoResponse {
    // Twilio media requires HTTP basic auth
    if !headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h.starts_with("Basic "))
    {
        return (StatusCode::UNAUTHORIZED, Vec::new()).into_response();
    }

    ([("content-type", "image/jpeg")], JPEG_BYTES.to_vec()).into_response()
}

pub struct RecipeUpstream(pub StubUpstream);

impl AsyncTestContext for RecipeUpstream {
    async fn setup() -> Self {
        Self(StubUpstream::spawn(three_recipes_reply()).await)
    }

    async fn teardown(self) {
        self.0.handle.abort();
    }
}

pub struct ProseUpstream(pub StubUpstream);

impl AsyncTestContext for ProseUpstream {
    async fn setup() -> Self {
        Self(StubUpstream::spawn("Sorry, I can't help with that photo.".to_string()).await)
    }

    async fn teardown(self) {
        self.0.handle.abort();
    }
}

pub fn test_args(vision_base_url: &str, auth_token: Option<&str>) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            metrics_enabled: false,
        },
        llm: LlmArgs {
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            base_url: vision_base_url.to_string(),
            timeout_secs: 5,
        },
        twilio: TwilioArgs {
            account_sid: Some(ACCOUNT_SID.to_string()),
            auth_token: auth_token.map(str::to_string),
            webhook_url: Some(WEBHOOK_URL.to_string()),
            media_timeout_secs: 5,
            reply_deadline_secs: 12,
        },
        log: LogArgs {
            filter: "warn".to_string(),
            json: false,
        },
        app_base_url: APP_BASE_URL.to_string(),
    }
}

pub fn test_server(args: Args) -> TestServer {
    let app_state = state(Arc::new(args)).expect("app state");
    let app = router(app_state).expect("router");
    TestServer::new(app).expect("test server")
}
