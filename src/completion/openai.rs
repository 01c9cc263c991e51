//! OpenAI互換の chat completions クライアント

use super::{CompletionBackend, CompletionRequest, CompletionResponse};
use crate::core::{ApiKey, CompletionError, GeneratorConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// HTTP client for chat completions.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: ApiKey,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, CompletionError> {
        Self::new(
            config.api_base_url(),
            config.api_key().clone(),
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = build_request_body(request);
        tracing::debug!(model = %request.model, endpoint = %self.endpoint(), "sending completion request");

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &request.model, &text));
        }

        parse_response(&text)
    }
}

fn build_request_body(request: &CompletionRequest) -> ChatCompletionRequest<'_> {
    ChatCompletionRequest {
        model: &request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &request.prompt.system,
            },
            ChatMessage {
                role: "user",
                content: &request.prompt.user,
            },
        ],
        response_format: request.json_response.then_some(ResponseFormat {
            kind: "json_object",
        }),
    }
}

/// HTTPステータスをエラー種別に対応付ける
fn classify_error(status: StatusCode, model: &str, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CompletionError::Authentication { message }
        }
        StatusCode::NOT_FOUND => CompletionError::ModelNotFound {
            model: model.to_string(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited { message },
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn parse_response(body: &str) -> Result<CompletionResponse, CompletionError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::malformed(format!("{e}; body: {body}")))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::malformed("choicesが空です"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| CompletionError::malformed("message.contentがありません"))?;

    Ok(CompletionResponse {
        content,
        total_tokens: parsed.usage.map(|usage| usage.total_tokens),
    })
}
