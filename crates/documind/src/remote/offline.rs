use async_trait::async_trait;

use super::error::RemoteCallError;
use super::types::AnalysisResponse;
use super::{AnalysisService, QaService};

/// Stand-in for both services when the config turns remote calls off.
/// Every call fails with [`RemoteCallError::Disabled`], so the pipeline
/// serves fallback data throughout.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineService;

#[async_trait]
impl AnalysisService for OfflineService {
    fn name(&self) -> &str {
        "offline"
    }

    async fn analyze(&self, _document: &str) -> Result<AnalysisResponse, RemoteCallError> {
        Err(RemoteCallError::Disabled)
    }
}

#[async_trait]
impl QaService for OfflineService {
    fn name(&self) -> &str {
        "offline"
    }

    async fn answer(&self, _question: &str, _document: &str) -> Result<String, RemoteCallError> {
        Err(RemoteCallError::Disabled)
    }
}
