//! reqwest-backed clients for the hosted analysis and QA endpoints.
//!
//! One POST per call, no retries. Every way a call can go wrong ends up as a
//! [`RemoteCallError`] for the coordinator to absorb.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::RemoteCallError;
use super::types::{
    AnalysisResponse, AnalyzeEnvelope, AnalyzeRequest, QaRequest, QaResponse, ANALYZE_ACTION,
};
use super::{AnalysisService, QaService};
use crate::config::HttpConfig;
use crate::sanitize;

/// Builds the shared reqwest client with the configured timeouts.
pub fn create_http_client(http: &HttpConfig) -> Result<Client, RemoteCallError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .build()
        .map_err(|e| RemoteCallError::ClientBuild(e.to_string()))
}

/// JSON-over-POST plumbing shared by both clients.
#[derive(Clone)]
struct JsonEndpoint {
    client: Client,
    url: String,
    api_key: Option<SecretString>,
}

impl JsonEndpoint {
    /// Sends `body` and returns the raw text of a 2xx response.
    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<String, RemoteCallError> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| RemoteCallError::Network {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body: sanitize::truncate_error_body(&body),
            });
        }

        response.text().await.map_err(|e| RemoteCallError::Network {
            url: self.url.clone(),
            reason: format!("Failed to read response body: {}", e),
        })
    }
}

pub(crate) fn parse_body<R: DeserializeOwned>(
    url: &str,
    text: &str,
) -> Result<R, RemoteCallError> {
    serde_json::from_str(text).map_err(|e| RemoteCallError::MalformedResponse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn parse_analysis_body(
    url: &str,
    text: &str,
) -> Result<AnalysisResponse, RemoteCallError> {
    let envelope: AnalyzeEnvelope = parse_body(url, text)?;
    let outputs = envelope.result.agent_outputs;
    Ok(AnalysisResponse {
        analysis: outputs.analysis.into_data(),
        summary: outputs.summary.into_data(),
    })
}

pub(crate) fn parse_qa_body(url: &str, text: &str) -> Result<String, RemoteCallError> {
    let response: QaResponse = parse_body(url, text)?;
    match response.answer {
        Some(answer) if !answer.trim().is_empty() => Ok(answer),
        Some(_) => Err(RemoteCallError::MalformedResponse {
            url: url.to_string(),
            reason: "answer is empty".to_string(),
        }),
        None => Err(RemoteCallError::MalformedResponse {
            url: url.to_string(),
            reason: "missing field `answer`".to_string(),
        }),
    }
}

/// Client for the combined analysis + summary endpoint.
pub struct HttpAnalysisClient {
    endpoint: JsonEndpoint,
}

impl HttpAnalysisClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self {
            endpoint: JsonEndpoint {
                client,
                url: url.into(),
                api_key,
            },
        }
    }

    pub fn url(&self) -> &str {
        &self.endpoint.url
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    fn name(&self) -> &str {
        "http-analysis"
    }

    async fn analyze(&self, document: &str) -> Result<AnalysisResponse, RemoteCallError> {
        info!(
            "Requesting analysis from {} for document {}",
            self.endpoint.url,
            sanitize::redact_text(document)
        );

        let body = AnalyzeRequest {
            content: document,
            action: ANALYZE_ACTION,
        };
        let text = self.endpoint.post(&body).await?;

        let response = parse_analysis_body(&self.endpoint.url, &text)?;
        debug!(
            "Analysis response: analysis={}, summary={}",
            response.analysis.is_some(),
            response.summary.is_some()
        );
        Ok(response)
    }
}

/// Client for the question-answering endpoint.
pub struct HttpQaClient {
    endpoint: JsonEndpoint,
}

impl HttpQaClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self {
            endpoint: JsonEndpoint {
                client,
                url: url.into(),
                api_key,
            },
        }
    }

    pub fn url(&self) -> &str {
        &self.endpoint.url
    }
}

#[async_trait]
impl QaService for HttpQaClient {
    fn name(&self) -> &str {
        "http-qa"
    }

    async fn answer(&self, question: &str, document: &str) -> Result<String, RemoteCallError> {
        debug!(
            "Asking {} a {}-char question about document {}",
            self.endpoint.url,
            question.chars().count(),
            sanitize::redact_text(document)
        );

        let body = QaRequest { question, document };
        let text = self.endpoint.post(&body).await?;
        parse_qa_body(&self.endpoint.url, &text)
    }
}
