//! Connection settings for an OpenAI-compatible endpoint.

use std::time::Duration;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenAiConfig {
    /// Base URL of the server, without the `/v1` suffix
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Model identifier used when a request does not override it
    pub model: String,
    /// Transport timeout for one request
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Settings for the public endpoint with a 30 second timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point at another compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions route.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
