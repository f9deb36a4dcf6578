//! Wire shapes of the analysis and QA endpoints.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, SummaryResult};

/// Action tag sent with every analysis request.
pub const ANALYZE_ACTION: &str = "analyze";

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub content: &'a str,
    pub action: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QaRequest<'a> {
    pub question: &'a str,
    pub document: &'a str,
}

/// `{ "result": { "agent_outputs": { "analysis": {...}, "summary": {...} } } }`
#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeEnvelope {
    pub result: AnalyzeBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeBody {
    pub agent_outputs: AgentOutputs,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentOutputs {
    pub analysis: AgentOutput<AnalysisResult>,
    pub summary: AgentOutput<SummaryResult>,
}

/// One agent's slot in the envelope. Servers that omit `success` are
/// treated as successful; a missing `data` reads as `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct AgentOutput<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> AgentOutput<T> {
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QaResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// What one analysis call yields. `None` on either side means that agent
/// reported a failure or returned no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResponse {
    pub analysis: Option<AnalysisResult>,
    pub summary: Option<SummaryResult>,
}
