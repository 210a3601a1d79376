use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    recipe::{
        ports::VisionModelClient, prompt::VISION_SYSTEM_PROMPT, value_objects::AnalyzeImageInput,
    },
};

const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct OpenAIVisionClient {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Outcome of one HTTP attempt, split so the caller knows whether to retry.
enum AttemptError {
    Transient(CoreError),
    Fatal(CoreError),
}

impl OpenAIVisionClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build vision HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model_name: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_openai_api(&self, request: &ChatCompletionRequest) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("OPENAI_API_KEY is not configured");
            CoreError::ExternalServiceError("vision model is not configured".to_string())
        })?;

        let mut attempt = 1;
        loop {
            match self.send_once(api_key, request).await {
                Ok(text) => return Ok(text),
                Err(AttemptError::Transient(e)) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(error = %e, attempt, "Transient vision API failure, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(AttemptError::Transient(e)) | Err(AttemptError::Fatal(e)) => return Err(e),
            }
        }
    }

    async fn send_once(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, AttemptError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Vision API request failed: {}", e);
                if e.is_timeout() {
                    AttemptError::Transient(CoreError::Timeout)
                } else if e.is_connect() {
                    AttemptError::Transient(CoreError::ExternalServiceError(format!(
                        "LLM API unreachable: {}",
                        e
                    )))
                } else {
                    AttemptError::Fatal(CoreError::ExternalServiceError(format!(
                        "LLM API error: {}",
                        e
                    )))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, error_text);
            let error = CoreError::ExternalServiceError(format!("LLM API returned {}", status));
            return Err(match status {
                StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => AttemptError::Transient(error),
                _ => AttemptError::Fatal(error),
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse vision API response: {}", e);
            AttemptError::Fatal(CoreError::ExternalServiceError(format!(
                "Failed to parse LLM response: {}",
                e
            )))
        })?;

        first_message_text(completion).ok_or_else(|| {
            AttemptError::Fatal(CoreError::ExternalServiceError(
                "No response from LLM".to_string(),
            ))
        })
    }
}

fn first_message_text(completion: ChatCompletionResponse) -> Option<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
}

impl VisionModelClient for OpenAIVisionClient {
    #[instrument(skip(self, prompt, image, response_schema), fields(model = %self.model_name))]
    async fn generate_with_image(
        &self,
        prompt: String,
        image: AnalyzeImageInput,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: vec![ContentPart::Text {
                        text: VISION_SYSTEM_PROMPT.to_string(),
                    }],
                },
                Message {
                    role: "user",
                    content: vec![
                        ContentPart::Text { text: prompt },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    ],
                },
            ],
            temperature: 0.4,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "recipe_suggestions",
                    strict: true,
                    schema: response_schema,
                },
            },
        };

        self.call_openai_api(&request).await
    }
}
