//! Anthropic HTTP client

use std::time::Duration;

use error_stack::{report, ResultExt};
use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::adapters::config::anthropic_config::AnthropicConfig;
use crate::ports::fortune_generator::GenerationError;

use super::types::{ApiError, MessageRequest, MessageResponse};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: Box<str>,
    base_url: Box<str>,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn transport_error(err: reqwest::Error) -> error_stack::Report<GenerationError> {
    let context = if err.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport
    };
    report!(err).change_context(context)
}

fn status_error(status: StatusCode) -> GenerationError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::InvalidApiKey,
        _ => GenerationError::Status {
            status: status.as_u16(),
        },
    }
}

impl AnthropicClient {
    pub fn new(config: &AnthropicConfig) -> error_stack::Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .change_context(GenerationError::ClientSetup)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').into(),
        })
    }

    /// Sends one request to the messages endpoint.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn create_message(
        &self,
        request: &MessageRequest,
    ) -> error_stack::Result<MessageResponse, GenerationError> {
        let url = format!("{}/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.as_ref())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(transport_error)
            .attach_printable_lazy(|| format!("POST {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|api_error| api_error.error.message)
                .unwrap_or(body);

            return Err(report!(status_error(status)))
                .attach_printable_lazy(|| format!("POST {} answered {}: {}", url, status, message));
        }

        response
            .json::<MessageResponse>()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    report!(err).change_context(GenerationError::Timeout)
                } else {
                    report!(err).change_context(GenerationError::MalformedResponse)
                }
            })
    }
}
