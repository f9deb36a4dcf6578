//! Builders and fixtures for test data.

#![allow(dead_code)]

use documind::config::{ApiKeyConfig, Config, EndpointConfig, FallbackConfig, HttpConfig};

/// The sample report used throughout the demo.
pub const SAMPLE_REPORT: &str = "DocuMind Annual Report 2024

Revenue: $12.5 million (up 45%)
Team: John Smith (CEO), Jane Doe (CTO)
Clients: 50+ enterprises
Technology: ERNIE LLM, PaddleOCR-VL, CAMEL-AI
";

/// Builder for `Config` instances pointing at test endpoints.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                http: HttpConfig {
                    connect_timeout_secs: 2,
                    request_timeout_secs: 5,
                },
                ..Config::default()
            },
        }
    }

    /// Points both endpoints at `base_url` (`/api/analyze` and `/api/qa`).
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.analysis = EndpointConfig {
            url: format!("{}/api/analyze", base_url),
        };
        self.config.qa = EndpointConfig {
            url: format!("{}/api/qa", base_url),
        };
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.config.offline = offline;
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.config.api_key = ApiKeyConfig {
            value: Some(key.to_string()),
            ..ApiKeyConfig::default()
        };
        self
    }

    pub fn fallback(mut self, excerpt_length: usize, min_document_length: usize) -> Self {
        self.config.fallback = FallbackConfig {
            excerpt_length,
            min_document_length,
        };
        self
    }

    pub fn build(self) -> Config {
        self.config
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.config).expect("config serializes")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A well-formed analysis service response body.
pub fn analysis_envelope(document_type: &str, summary: serde_json::Value) -> String {
    serde_json::json!({
        "success": true,
        "result": {
            "agent_outputs": {
                "analysis": {
                    "success": true,
                    "data": {
                        "document_type": document_type,
                        "sentiment": "neutral",
                        "key_entities": { "persons": ["Ada Lovelace"] },
                        "summary": "Remote one-liner."
                    }
                },
                "summary": { "success": true, "data": summary }
            }
        }
    })
    .to_string()
}
