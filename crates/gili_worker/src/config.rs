//! Layered worker configuration.
//!
//! Sources, lowest precedence first:
//! - bundled defaults (`gili.toml` compiled into the binary)
//! - `~/.config/gili/gili.toml`
//! - `./gili.toml`, or the file passed on the command line
//! - `GILI__SECTION__KEY` environment variables
//!
//! The loaded value is immutable and handed to constructors by reference.

use config::{Config, Environment, File, FileFormat};
use gili_error::{ConfigError, GiliResult};
use gili_models::OpenAiConfig;
use gili_pipeline::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../gili.toml");

/// Message broker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// AMQP connection URL
    pub url: String,
    /// Work queue the worker consumes
    pub queue: String,
    /// Queue receiving failed message bodies
    pub dead_letter_queue: String,
    /// Unacknowledged messages in flight per worker
    pub prefetch: u16,
    /// Consumer tag announced to the broker
    pub consumer_tag: String,
}

/// Story store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
}

/// Reasoning capability settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible server
    pub base_url: String,
    /// Bearer token; falls back to `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token limit
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Deadline for one reasoning call
    pub timeout_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilitySettings {
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

/// Complete worker configuration.
///
/// # Example
///
/// ```no_run
/// use gili_worker::GiliConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GiliConfig::load(None)?;
/// println!("Consuming from {}", config.broker.queue);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiliConfig {
    /// Broker section
    pub broker: BrokerConfig,
    /// Database section
    pub database: DatabaseConfig,
    /// Model section
    pub model: ModelConfig,
    /// Observability section
    pub observability: ObservabilitySettings,
}

impl GiliConfig {
    /// Load configuration from every layer.
    ///
    /// `path` replaces the optional `./gili.toml` layer and must exist.
    #[instrument]
    pub fn load(path: Option<&Path>) -> GiliResult<Self> {
        debug!("Loading configuration: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/gili/gili.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("gili").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("GILI")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        if config.model.api_key.as_deref().is_none_or(str::is_empty) {
            config.model.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        Ok(config)
    }

    /// Parse the bundled defaults alone.
    pub fn defaults() -> GiliResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Request parameters for the evaluator.
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig::builder()
            .temperature(self.model.temperature)
            .max_tokens(self.model.max_tokens)
            .timeout(Duration::from_secs(self.model.timeout_secs))
            .build()
            .unwrap_or_default()
    }

    /// Connection settings for the reasoning client.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured.
    pub fn openai_config(&self) -> GiliResult<OpenAiConfig> {
        let api_key = self
            .model
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ConfigError::new("no API key; set GILI__MODEL__API_KEY or OPENAI_API_KEY")
                    .for_key("model.api_key")
            })?;

        Ok(OpenAiConfig::new(api_key, self.model.model.clone())
            .with_base_url(self.model.base_url.clone())
            .with_timeout(Duration::from_secs(self.model.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gili_error::GiliErrorKind;

    #[test]
    fn bundled_defaults_parse() {
        let config = GiliConfig::defaults().unwrap();
        assert_eq!(config.broker.queue, "story_evaluation");
        assert_eq!(config.broker.dead_letter_queue, "story_evaluation_dlq");
        assert_eq!(config.broker.prefetch, 1);
        assert_eq!(config.model.model, "gpt-3.5-turbo");
        assert_eq!(config.model.timeout_secs, 30);
        assert_eq!(config.model.api_key, None);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn evaluator_config_follows_model_section() {
        let mut config = GiliConfig::defaults().unwrap();
        config.model.temperature = 0.2;
        config.model.timeout_secs = 12;

        let evaluator = config.evaluator_config();
        assert_eq!(*evaluator.temperature(), 0.2);
        assert_eq!(*evaluator.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn openai_config_requires_a_key() {
        let mut config = GiliConfig::defaults().unwrap();
        let err = config.openai_config().unwrap_err();
        match err.kind() {
            GiliErrorKind::Config(e) => assert_eq!(e.key.as_deref(), Some("model.api_key")),
            other => panic!("expected a config error, got {other}"),
        }

        config.model.api_key = Some("sk-test".to_string());
        config.model.base_url = "http://localhost:8080".to_string();
        let openai = config.openai_config().unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.completions_url(), "http://localhost:8080/v1/chat/completions");
    }
}
