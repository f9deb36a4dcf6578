use serde::{Deserialize, Serialize};

pub const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8000/api/analyze";
pub const DEFAULT_QA_URL: &str = "http://localhost:8000/api/qa";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_analysis_endpoint")]
    pub analysis: EndpointConfig,
    #[serde(default = "default_qa_endpoint")]
    pub qa: EndpointConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub api_key: ApiKeyConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Skip both remote services and serve fallback data only.
    #[serde(default)]
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: default_analysis_endpoint(),
            qa: default_qa_endpoint(),
            http: HttpConfig::default(),
            api_key: ApiKeyConfig::default(),
            fallback: FallbackConfig::default(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointConfig {
    pub url: String,
}

fn default_analysis_endpoint() -> EndpointConfig {
    EndpointConfig {
        url: DEFAULT_ANALYSIS_URL.to_string(),
    }
}

fn default_qa_endpoint() -> EndpointConfig {
    EndpointConfig {
        url: DEFAULT_QA_URL.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// LLM calls are slow; the hosted endpoints routinely need most of a minute.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where to find the bearer token sent to both services. All optional;
/// with none set, requests go out unauthenticated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiKeyConfig {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub env_var: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FallbackConfig {
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    #[serde(default = "default_min_document_length")]
    pub min_document_length: usize,
}

fn default_excerpt_length() -> usize {
    200
}

fn default_min_document_length() -> usize {
    50
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
            min_document_length: default_min_document_length(),
        }
    }
}
