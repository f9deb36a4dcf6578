use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, ResultSource, StageOutput, SummaryResult};

use super::stage::Stage;

/// One line of a run's stage log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub stage: Stage,
    pub message: String,
}

/// Result recorded for a stage. Stages without a result have no entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "output", rename_all = "snake_case")]
pub enum StageResult {
    Analysis(StageOutput<AnalysisResult>),
    Summary(StageOutput<SummaryResult>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    /// Where an assistant answer came from; `None` on user turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ResultSource>,
}

impl ChatTurn {
    pub fn user(question: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: question.into(),
            source: None,
        }
    }

    pub fn assistant(answer: impl Into<String>, source: ResultSource) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: answer.into(),
            source: Some(source),
        }
    }
}

/// A question and the answer it got, as returned by
/// [`Coordinator::ask_all`](super::Coordinator::ask_all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// One document's traversal through the stages.
///
/// Created by [`Coordinator::submit`](super::Coordinator::submit) and only
/// moved forward by the coordinator. The log and chat history are
/// append-only for the run's lifetime; a new submit produces a new run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    id: Uuid,
    #[serde(skip)]
    document: String,
    stage: Stage,
    log: Vec<LogEntry>,
    results: BTreeMap<Stage, StageResult>,
    chat_history: Vec<ChatTurn>,
    /// Summary half of the shared analysis response, held until the summary
    /// stage. `Err` carries the reason the summary must fall back.
    #[serde(skip)]
    pending_summary: Option<Result<SummaryResult, String>>,
}

impl PipelineRun {
    pub(crate) fn new(document: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            document,
            stage: Stage::CoordinatorInit,
            log: Vec::new(),
            results: BTreeMap::new(),
            chat_history: Vec::new(),
            pending_summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_qa_ready(&self) -> bool {
        self.stage.is_terminal()
    }

    pub fn log_entries(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn results(&self) -> &BTreeMap<Stage, StageResult> {
        &self.results
    }

    pub fn analysis(&self) -> Option<&StageOutput<AnalysisResult>> {
        match self.results.get(&Stage::Analysis) {
            Some(StageResult::Analysis(output)) => Some(output),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&StageOutput<SummaryResult>> {
        match self.results.get(&Stage::Summary) {
            Some(StageResult::Summary(output)) => Some(output),
            _ => None,
        }
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    /// Appends a log entry stamped with the current wall-clock time. A clock
    /// that stepped backwards is clamped to the previous entry so the log
    /// stays ordered.
    pub fn log(&mut self, stage: Stage, message: impl Into<String>) {
        let now = Utc::now();
        let timestamp = match self.log.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.log.push(LogEntry {
            timestamp,
            stage,
            message: message.into(),
        });
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn set_result(&mut self, stage: Stage, result: StageResult) {
        self.results.insert(stage, result);
    }

    pub(crate) fn hold_summary(&mut self, summary: Result<SummaryResult, String>) {
        self.pending_summary = Some(summary);
    }

    pub(crate) fn take_summary(&mut self) -> Option<Result<SummaryResult, String>> {
        self.pending_summary.take()
    }

    pub(crate) fn push_turn(&mut self, turn: ChatTurn) {
        self.chat_history.push(turn);
    }
}
