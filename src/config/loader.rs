//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Values taken from the environment, captured once so that overrides stay
/// testable without touching process state.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub port: Option<String>,
    pub host: Option<String>,
    pub site_env: Option<String>,
}

impl EnvOverrides {
    /// Read `PORT`, `HOST` and `SITE_ENV`.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok(),
            host: std::env::var("HOST").ok(),
            site_env: std::env::var("SITE_ENV").ok(),
        }
    }
}

/// Apply environment and command-line overrides.
///
/// Port precedence: a non-zero numeric `PORT`, then the `--port` flag, then
/// the configured port.
pub fn apply_overrides(config: &mut SiteConfig, env: &EnvOverrides, port_flag: Option<u16>) {
    let env_port = env
        .port
        .as_deref()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .filter(|p| *p != 0);

    if let Some(port) = env_port.or(port_flag.filter(|p| *p != 0)) {
        config.listener.port = port;
    }

    if let Some(host) = env.host.as_deref().filter(|h| !h.trim().is_empty()) {
        config.listener.host = Some(host.to_string());
    }

    if env.site_env.as_deref() == Some("production") {
        config.observability.production = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse_config(
            r#"
            [site]
            title = "Example"

            [locales]
            supported = ["en-US", "fr-FR"]
            default = "en-US"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Example");
        assert_eq!(config.locales.supported.len(), 2);
        assert_eq!(config.locales.cookie_name, "language");
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn test_parse_rejects_invalid_config() {
        let err = parse_config("[locales]\nsupported = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_port_precedence() {
        let mut config = SiteConfig::default();
        let env = EnvOverrides {
            port: Some("8123".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &env, Some(7000));
        assert_eq!(config.listener.port, 8123);

        let mut config = SiteConfig::default();
        let env = EnvOverrides {
            port: Some("not-a-port".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &env, Some(7000));
        assert_eq!(config.listener.port, 7000);
        assert_eq!(config.listener.public_host(), "http://localhost:7000");
    }

    #[test]
    fn test_host_and_production_overrides() {
        let mut config = SiteConfig::default();
        let env = EnvOverrides {
            port: None,
            host: Some("https://example.org".into()),
            site_env: Some("production".into()),
        };
        apply_overrides(&mut config, &env, None);
        assert_eq!(config.listener.public_host(), "https://example.org");
        assert!(config.observability.production);
    }
}
