//! Configuration error types.

/// Configuration error with source location.
///
/// `key` names the setting that was missing or malformed, in dotted form
/// (`model.api_key`), when a single setting is at fault.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Configuration Error [{}]: {} at line {} in {}",
    key.as_deref().unwrap_or("gili.toml"),
    message,
    line,
    file
)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Offending setting, if one is to blame
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use gili_error::ConfigError;
    ///
    /// let err = ConfigError::new("missing [broker] section");
    /// assert!(err.to_string().starts_with("Configuration Error [gili.toml]"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Blame a single setting.
    ///
    /// ```
    /// use gili_error::ConfigError;
    ///
    /// let err = ConfigError::new("no API key configured").for_key("model.api_key");
    /// assert_eq!(err.key.as_deref(), Some("model.api_key"));
    /// assert!(err.to_string().contains("[model.api_key]"));
    /// ```
    pub fn for_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
