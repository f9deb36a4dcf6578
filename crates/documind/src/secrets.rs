//! API key resolution.
//!
//! The key for the hosted services can come from three places, checked in
//! this order:
//!
//! 1. **Direct value** in the config file (local experiments only)
//! 2. **File** holding the key, e.g. a mounted Docker secret
//! 3. **Environment variable**
//!
//! Empty strings count as "not configured" at every level.

use secrecy::SecretString;

use crate::config::ApiKeyConfig;

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Failed to read API key from file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{name}' not set")]
    EnvVarNotSet { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8")]
    EnvVarNotUnicode { name: String },
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Resolves the configured API key. `Ok(None)` means no source is configured.
pub fn resolve_api_key(config: &ApiKeyConfig) -> Result<Option<SecretString>> {
    if let Some(value) = non_empty(config.value.as_deref()) {
        return Ok(Some(SecretString::from(value.to_string())));
    }

    if let Some(path) = non_empty(config.file.as_deref()) {
        let expanded = expand_home(path);
        let content = std::fs::read_to_string(&expanded).map_err(|e| SecretError::FileRead {
            path: expanded.clone(),
            source: e,
        })?;
        return Ok(Some(SecretString::from(content.trim().to_string())));
    }

    if let Some(name) = non_empty(config.env_var.as_deref()) {
        return match std::env::var(name) {
            // Env files often leave a trailing newline behind.
            Ok(value) => Ok(Some(SecretString::from(value.trim().to_string()))),
            Err(std::env::VarError::NotPresent) => Err(SecretError::EnvVarNotSet {
                name: name.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::EnvVarNotUnicode {
                name: name.to_string(),
            }),
        };
    }

    Ok(None)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Expands a leading `~` or `~/` to the home directory (HOME, then USERPROFILE).
fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
