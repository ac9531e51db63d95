//! Configuration for the Groq client.

use crate::error::{ModelError, Result};

/// Base URL of Groq's OpenAI-compatible API.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Environment variable holding the API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Settings for a [`GroqClient`](super::GroqClient).
#[derive(Clone, PartialEq)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl GroqConfig {
    /// Create a config with the default model and temperature.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GROQ_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    /// Create a config using the `GROQ_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(GROQ_API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ModelError::Config(format!("{GROQ_API_KEY_ENV} environment variable not set"))),
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Cap the completion length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ModelError::Config("API key must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ModelError::Config("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ModelError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GroqConfig::new("gsk-test");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.base_url, GROQ_API_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation() {
        assert!(GroqConfig::new("").validate().is_err());
        assert!(GroqConfig::new("k").with_model("").validate().is_err());
        assert!(GroqConfig::new("k").with_temperature(3.5).validate().is_err());
    }

    #[test]
    fn debug_hides_api_key() {
        let rendered = format!("{:?}", GroqConfig::new("gsk-secret"));
        assert!(!rendered.contains("gsk-secret"));
    }
}
