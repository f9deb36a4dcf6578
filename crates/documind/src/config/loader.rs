use std::path::Path;

use crate::config::schema::{Config, EndpointConfig};
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    validate_endpoint("analysis", &config.analysis)?;
    validate_endpoint("qa", &config.qa)?;

    if config.http.connect_timeout_secs == 0 || config.http.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "HTTP timeouts must be greater than zero".to_string(),
        });
    }

    if config.fallback.excerpt_length == 0 {
        return Err(ConfigError::Validation {
            message: "fallback.excerptLength must be greater than zero".to_string(),
        });
    }

    Ok(())
}

fn validate_endpoint(name: &str, endpoint: &EndpointConfig) -> Result<(), ConfigError> {
    let url = endpoint.url.trim();
    if url.is_empty() {
        return Err(ConfigError::InvalidEndpoint {
            name: name.to_string(),
            reason: "URL is empty".to_string(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidEndpoint {
            name: name.to_string(),
            reason: format!("URL must use http or https: {}", url),
        });
    }
    Ok(())
}
