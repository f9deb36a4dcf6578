//! Clients for the hosted analysis and QA services.

pub mod error;
pub mod http;
pub mod offline;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::secrets;

pub use error::RemoteCallError;
pub use http::{create_http_client, HttpAnalysisClient, HttpQaClient};
pub use offline::OfflineService;
pub use types::AnalysisResponse;

/// Combined analysis + summary agent. One call yields both outputs.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, document: &str) -> Result<AnalysisResponse, RemoteCallError>;
}

/// Question-answering agent over a document.
#[async_trait]
pub trait QaService: Send + Sync {
    fn name(&self) -> &str;

    async fn answer(&self, question: &str, document: &str) -> Result<String, RemoteCallError>;
}

/// The pair of services a coordinator talks to.
#[derive(Clone)]
pub struct RemoteServices {
    pub analysis: Arc<dyn AnalysisService>,
    pub qa: Arc<dyn QaService>,
}

impl RemoteServices {
    /// Both services disabled.
    pub fn offline() -> Self {
        Self {
            analysis: Arc::new(OfflineService),
            qa: Arc::new(OfflineService),
        }
    }

    /// HTTP clients for the configured endpoints, or offline stand-ins when
    /// `config.offline` is set.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        if config.offline {
            return Ok(Self::offline());
        }

        let api_key = secrets::resolve_api_key(&config.api_key)?;
        let client = create_http_client(&config.http)?;

        Ok(Self {
            analysis: Arc::new(HttpAnalysisClient::new(
                client.clone(),
                config.analysis.url.clone(),
                api_key.clone(),
            )),
            qa: Arc::new(HttpQaClient::new(client, config.qa.url.clone(), api_key)),
        })
    }
}
