use std::path::PathBuf;
use thiserror::Error;

pub use crate::pipeline::error::InputError;
pub use crate::remote::error::RemoteCallError;
pub use crate::secrets::SecretError;

#[derive(Error, Debug)]
pub enum DocumindError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteCallError),

    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid endpoint '{name}': {reason}")]
    InvalidEndpoint { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DocumindError>;
