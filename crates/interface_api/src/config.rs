//! API configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `console.toml` in the working directory, then `CONSOLE_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `CONSOLE_WIZARD__MIN_LOADING_MS=500` or `CONSOLE_ASSISTANT__BACKEND=disabled`.

use serde::Deserialize;

use domain_wizard::WizardSettings;
use infra_assist::AssistantSettings;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Minimum loading time and scenario table
    pub wizard: WizardSettings,
    /// Text-generation backend and timeouts
    pub assistant: AssistantSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            wizard: WizardSettings::default(),
            assistant: AssistantSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `console.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("console").required(false))
            .add_source(
                config::Environment::with_prefix("CONSOLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.wizard.min_loading_ms, 2_000);
        assert_eq!(config.assistant.quotation_timeout_ms, 30_000);
    }

    #[test]
    fn test_partial_sources_keep_defaults() {
        let config: ApiConfig = config::Config::builder()
            .set_override("port", 9090)
            .unwrap()
            .set_override("wizard.min_loading_ms", 250)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.wizard.min_loading_ms, 250);
        assert_eq!(config.wizard.scenarios, WizardSettings::default().scenarios);
    }
}
