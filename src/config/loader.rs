//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ManagerConfig;
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

/// Load and validate configuration.
///
/// Starts from the TOML file when one is given, otherwise from defaults,
/// then applies environment overrides (`PORT`, `CADDYFILE_PATH`,
/// `CADDY_ADMIN_ENDPOINT`, `TZ`).
pub fn load_config(path: Option<&Path>) -> Result<ManagerConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ManagerConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut ManagerConfig) {
    if let Ok(port) = std::env::var("PORT") {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }
    if let Ok(path) = std::env::var("CADDYFILE_PATH") {
        config.document.path = path;
    }
    if let Ok(endpoint) = std::env::var("CADDY_ADMIN_ENDPOINT") {
        config.control_plane.admin_endpoint = endpoint;
    }
    if let Ok(tz) = std::env::var("TZ") {
        config.document.timezone = tz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_toml() {
        let toml_src = r#"
            [document]
            path = "/etc/caddy/Caddyfile"
            timezone = "Europe/Berlin"

            [control_plane]
            admin_endpoint = "http://localhost:2019"
        "#;
        let config: ManagerConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.document.path, "/etc/caddy/Caddyfile");
        assert_eq!(config.document.timezone, "Europe/Berlin");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.control_plane.push_timeout_secs, 10);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[control_plane]\nadmin_endpoint = \"ftp://x\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
