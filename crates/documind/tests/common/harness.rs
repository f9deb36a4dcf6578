//! Stub remote services for driving the coordinator without a network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use documind::remote::{AnalysisResponse, AnalysisService, QaService, RemoteCallError};
use documind::{Coordinator, FallbackProvider, RemoteServices};

/// Analysis stub that returns a fixed response, or fails when it has none.
pub struct StubAnalysis {
    response: Option<AnalysisResponse>,
    calls: AtomicUsize,
}

impl StubAnalysis {
    pub fn ok(response: AnalysisResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for StubAnalysis {
    fn name(&self) -> &str {
        "stub-analysis"
    }

    async fn analyze(&self, _document: &str) -> Result<AnalysisResponse, RemoteCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().ok_or_else(|| RemoteCallError::Network {
            url: "http://stub.invalid/api/analyze".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// QA stub with a fixed answer, or a failure when it has none.
pub struct StubQa {
    answer: Option<String>,
    calls: AtomicUsize,
}

impl StubQa {
    pub fn ok(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(answer.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QaService for StubQa {
    fn name(&self) -> &str {
        "stub-qa"
    }

    async fn answer(&self, _question: &str, _document: &str) -> Result<String, RemoteCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().ok_or_else(|| RemoteCallError::Status {
            url: "http://stub.invalid/api/qa".to_string(),
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }
}

pub fn stub_coordinator(analysis: Arc<StubAnalysis>, qa: Arc<StubQa>) -> Coordinator {
    Coordinator::new(RemoteServices { analysis, qa }, FallbackProvider::default())
}
