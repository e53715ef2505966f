use crate::error::ConfigError;
use config::{Config, Environment};
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;
use trip_planner::model::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use trip_planner::providers::openrouter::{
    OPENROUTER_DEFAULT_HOST, OPENROUTER_DEFAULT_TIMEOUT_SECS,
};
use trip_planner::providers::OpenRouterConfig;
use trip_planner::ModelConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Resolve the configured host, which may be a hostname such as `localhost`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ConfigError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_host")]
    pub host: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: default_provider_host(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderSettings {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::new(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }

    /// The credential is not part of the layered settings; it comes straight
    /// from `OPEN_ROUTER_API_KEY` and may be absent.
    pub fn openrouter_config(&self) -> OpenRouterConfig {
        OpenRouterConfig::from_env()
            .with_host(self.host.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSettings {
    /// Directory for daily rotated log files; stdout only when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        // Start with default configuration
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Provider defaults
            .set_default("provider.host", default_provider_host())?
            .set_default("provider.model", default_model())?
            .set_default("provider.timeout_secs", default_timeout_secs())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("TRIP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })?;

        if let Some(temperature) = settings.provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidValue {
                    env_var: "TRIP_PROVIDER__TEMPERATURE".to_string(),
                    reason: format!("{temperature} is outside 0.0..=2.0"),
                });
            }
        }

        Ok(settings)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_provider_host() -> String {
    OPENROUTER_DEFAULT_HOST.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> Option<f32> {
    Some(DEFAULT_TEMPERATURE)
}

fn default_timeout_secs() -> u64 {
    OPENROUTER_DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("TRIP_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.provider.host, "https://openrouter.ai");
        assert_eq!(settings.provider.model, "google/gemma-3n-e2b-it:free");
        assert_eq!(settings.provider.temperature, Some(0.3));
        assert_eq!(settings.provider.max_tokens, None);
        assert_eq!(settings.provider.timeout_secs, 600);
        assert!(settings.log.dir.is_none());
        assert!(!settings.log.json);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("TRIP_SERVER__PORT", "8080");
        env::set_var("TRIP_PROVIDER__HOST", "http://localhost:1234");
        env::set_var("TRIP_PROVIDER__MODEL", "openai/gpt-4o-mini");
        env::set_var("TRIP_PROVIDER__TEMPERATURE", "0.7");
        env::set_var("TRIP_PROVIDER__MAX_TOKENS", "512");
        env::set_var("TRIP_PROVIDER__TIMEOUT_SECS", "30");
        env::set_var("TRIP_LOG__JSON", "true");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.provider.host, "http://localhost:1234");
        assert_eq!(settings.provider.model, "openai/gpt-4o-mini");
        assert_eq!(settings.provider.temperature, Some(0.7));
        assert_eq!(settings.provider.max_tokens, Some(512));
        assert_eq!(settings.provider.timeout_secs, 30);
        assert!(settings.log.json);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_out_of_range_temperature_is_rejected() {
        clean_env();
        env::set_var("TRIP_PROVIDER__TEMPERATURE", "3.5");

        let err = Settings::new().unwrap_err();
        assert!(err.to_string().contains("TRIP_PROVIDER__TEMPERATURE"));

        clean_env();
    }

    #[test]
    #[serial]
    fn test_model_config_conversion() {
        env::set_var("OPEN_ROUTER_API_KEY", "key");

        let settings = ProviderSettings {
            model: "meta-llama/llama-3.3-70b-instruct".to_string(),
            temperature: Some(0.5),
            max_tokens: Some(1000),
            ..ProviderSettings::default()
        };

        let model = settings.model_config();
        assert_eq!(model.model_name, "meta-llama/llama-3.3-70b-instruct");
        assert_eq!(model.temperature, Some(0.5));
        assert_eq!(model.max_tokens, Some(1000));

        let openrouter = settings.openrouter_config();
        assert_eq!(openrouter.host, "https://openrouter.ai");
        assert_eq!(openrouter.api_key.as_deref(), Some("key"));
        assert_eq!(openrouter.timeout, Duration::from_secs(600));

        env::remove_var("OPEN_ROUTER_API_KEY");
        assert!(settings.openrouter_config().api_key.is_none());
    }

    #[test]
    fn test_socket_addr_conversion() {
        let server_settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let addr = server_settings.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");

        let hostname = ServerSettings {
            host: "localhost".to_string(),
            port: 3000,
        };
        let addr = hostname.socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3000);

        let invalid = ServerSettings {
            host: "not a host".to_string(),
            port: 3000,
        };
        assert!(invalid.socket_addr().is_err());
    }
}
