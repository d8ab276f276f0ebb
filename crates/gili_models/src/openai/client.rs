use crate::{
    ChatCompletionRequest, ChatCompletionResponse, OpenAiConfig, from_chat_response,
    to_chat_request,
};
use async_trait::async_trait;
use gili_core::{GenerateRequest, GenerateResponse};
use gili_error::{GiliResult, ModelsError, ModelsErrorKind};
use gili_interface::GiliDriver;
use tracing::instrument;

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client with the configured transport timeout.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: OpenAiConfig) -> Result<Self, ModelsError> {
        tracing::debug!("Creating OpenAI client");
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Configuration(e.to_string())))?;
        Ok(Self { config, client })
    }

    /// Get the client configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelsError> {
        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Provider returned error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            if e.is_timeout() {
                ModelsError::new(ModelsErrorKind::Timeout)
            } else {
                ModelsError::new(ModelsErrorKind::Deserialization(e.to_string()))
            }
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

fn transport_error(err: reqwest::Error) -> ModelsError {
    if err.is_timeout() {
        ModelsError::new(ModelsErrorKind::Timeout)
    } else {
        ModelsError::new(ModelsErrorKind::Http(err.to_string()))
    }
}

#[async_trait]
impl GiliDriver for OpenAiClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> GiliResult<GenerateResponse> {
        let chat_request = to_chat_request(req, &self.config.model);
        let response = self.chat_completion(&chat_request).await?;
        Ok(from_chat_response(response)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
