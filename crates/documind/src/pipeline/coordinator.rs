use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::analysis::{ResultSource, StageOutput};
use crate::config::Config;
use crate::fallback::FallbackProvider;
use crate::remote::{AnalysisService, QaService, RemoteServices};
use crate::sanitize;

use super::error::InputError;
use super::progress::{NoopProgress, ProgressEvent, ProgressReporter};
use super::run::{ChatTurn, PipelineRun, QaPair, StageResult};
use super::stage::Stage;

/// Returned by `ask` when no run has reached `qa-ready`.
pub const NO_DOCUMENT_SENTINEL: &str = "Please process a document first.";

/// Returned by `ask` for an empty or whitespace-only question.
pub const EMPTY_QUESTION_SENTINEL: &str = "Please enter a question.";

/// Drives runs through coordinator-init → analysis → summary → qa-ready.
///
/// Holds no per-run state: every run is a [`PipelineRun`] value the caller
/// owns and lends back mutably, one stage at a time.
pub struct Coordinator {
    analysis: Arc<dyn AnalysisService>,
    qa: Arc<dyn QaService>,
    fallback: FallbackProvider,
    progress: Arc<dyn ProgressReporter>,
}

impl Coordinator {
    pub fn new(services: RemoteServices, fallback: FallbackProvider) -> Self {
        Self {
            analysis: services.analysis,
            qa: services.qa,
            fallback,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Production constructor: HTTP clients (or offline stand-ins) and the
    /// fallback settings, all from config.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let services = RemoteServices::from_config(config)?;
        Ok(Self::new(
            services,
            FallbackProvider::from_config(&config.fallback),
        ))
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn fallback(&self) -> &FallbackProvider {
        &self.fallback
    }

    /// Starts a new run over `document` in `coordinator-init`.
    pub fn submit(&self, document: &str) -> Result<PipelineRun, InputError> {
        if document.trim().is_empty() {
            return Err(InputError::EmptyDocument);
        }

        let mut run = PipelineRun::new(document.to_string());
        let message = format!(
            "Coordinator initialized with a {}-character document",
            document.chars().count()
        );
        info!(
            run_id = %run.id(),
            document = %sanitize::redact_text(document),
            "Pipeline run submitted"
        );
        run.log(Stage::CoordinatorInit, message.clone());
        self.progress.report(
            run.id(),
            ProgressEvent::StageEntered {
                stage: Stage::CoordinatorInit,
                message,
            },
        );
        Ok(run)
    }

    /// Moves `run` to its next stage and returns the stage it is now in.
    /// At `qa-ready` this is a no-op. Remote failures are absorbed by
    /// fallback data; this never fails.
    pub async fn advance(&self, run: &mut PipelineRun) -> Stage {
        let run_id = run.id();
        match run.stage() {
            Stage::CoordinatorInit => {
                self.step_analysis(run)
                    .instrument(info_span!("analysis", run_id = %run_id))
                    .await;
            }
            Stage::Analysis => {
                let _step = info_span!("summary", run_id = %run_id).entered();
                self.step_summary(run);
            }
            Stage::Summary => {
                let _step = info_span!("qa_ready", run_id = %run_id).entered();
                self.step_qa_ready(run);
            }
            Stage::QaReady => {
                debug!(run_id = %run_id, "Run already qa-ready, nothing to advance");
            }
        }
        run.stage()
    }

    /// Advances until `qa-ready`.
    pub async fn run_to_completion(&self, run: &mut PipelineRun) {
        while !run.is_qa_ready() {
            self.advance(run).await;
        }
    }

    /// Answers `question` about the run's document. Before `qa-ready` the
    /// sentinel is returned and the chat history is left alone.
    pub async fn ask(&self, run: &mut PipelineRun, question: &str) -> String {
        if !run.is_qa_ready() {
            debug!(run_id = %run.id(), stage = %run.stage(), "Question asked before qa-ready");
            return NO_DOCUMENT_SENTINEL.to_string();
        }
        if question.trim().is_empty() {
            return EMPTY_QUESTION_SENTINEL.to_string();
        }

        let span = info_span!("qa", run_id = %run.id());
        let (answer, source) = match self
            .qa
            .answer(question, run.document())
            .instrument(span)
            .await
        {
            Ok(answer) => (answer, ResultSource::Remote),
            Err(e) => {
                warn!(
                    run_id = %run.id(),
                    service = self.qa.name(),
                    error = %e,
                    "QA service call failed, answering from fallback rules"
                );
                (
                    self.fallback.answer(question, run.document()),
                    ResultSource::Fallback,
                )
            }
        };

        run.push_turn(ChatTurn::user(question));
        run.push_turn(ChatTurn::assistant(answer.clone(), source));
        run.log(Stage::QaReady, format!("Question answered ({})", source));
        answer
    }

    /// Asks each question in turn, in order, as separate chat turns.
    /// Every question gets an answer, sentinels included.
    pub async fn ask_all<Q: AsRef<str>>(
        &self,
        run: &mut PipelineRun,
        questions: &[Q],
    ) -> Vec<QaPair> {
        let mut pairs = Vec::with_capacity(questions.len());
        for question in questions {
            let question = question.as_ref();
            let answer = self.ask(run, question).await;
            pairs.push(QaPair {
                question: question.to_string(),
                answer,
            });
        }
        pairs
    }

    fn enter(&self, run: &mut PipelineRun, stage: Stage, message: &str) {
        run.enter(stage);
        run.log(stage, message);
        self.progress.report(
            run.id(),
            ProgressEvent::StageEntered {
                stage,
                message: message.to_string(),
            },
        );
    }

    fn note_fallback(&self, run: &mut PipelineRun, stage: Stage, reason: String) {
        run.log(stage, format!("Using fallback data: {}", reason));
        self.progress
            .report(run.id(), ProgressEvent::FallbackUsed { stage, reason });
    }

    /// The single remote call of a run. Its response feeds this stage and
    /// the summary stage.
    async fn step_analysis(&self, run: &mut PipelineRun) {
        self.enter(
            run,
            Stage::Analysis,
            "Dispatching document to the analysis agent",
        );

        let (analysis, summary) = match self.analysis.analyze(run.document()).await {
            Ok(response) => (
                response
                    .analysis
                    .ok_or_else(|| "analysis agent returned no result".to_string()),
                response
                    .summary
                    .ok_or_else(|| "summary agent returned no result".to_string()),
            ),
            Err(e) => {
                warn!(
                    run_id = %run.id(),
                    service = self.analysis.name(),
                    error = %e,
                    "Analysis service call failed, using fallback data"
                );
                let reason = format!("analysis service unavailable ({})", e);
                (Err(reason.clone()), Err(reason))
            }
        };

        let output = match analysis {
            Ok(result) => StageOutput::remote(result),
            Err(reason) => {
                self.note_fallback(run, Stage::Analysis, reason);
                StageOutput::fallback(self.fallback.analysis())
            }
        };
        run.log(
            Stage::Analysis,
            format!("Analysis complete ({})", output.source),
        );
        run.set_result(Stage::Analysis, StageResult::Analysis(output));
        run.hold_summary(summary);
    }

    fn step_summary(&self, run: &mut PipelineRun) {
        self.enter(run, Stage::Summary, "Collecting the summary agent's output");

        let output = match run.take_summary() {
            Some(Ok(summary)) => StageOutput::remote(summary),
            Some(Err(reason)) => {
                self.note_fallback(run, Stage::Summary, reason);
                StageOutput::fallback(self.fallback.summary())
            }
            None => {
                self.note_fallback(
                    run,
                    Stage::Summary,
                    "no analysis response for this run".to_string(),
                );
                StageOutput::fallback(self.fallback.summary())
            }
        };
        run.log(
            Stage::Summary,
            format!("Summary complete ({})", output.source),
        );
        run.set_result(Stage::Summary, StageResult::Summary(output));
    }

    fn step_qa_ready(&self, run: &mut PipelineRun) {
        self.enter(
            run,
            Stage::QaReady,
            "QA agent ready: document set as question context",
        );
        info!(run_id = %run.id(), "Pipeline run complete");
        self.progress.report(run.id(), ProgressEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, SummaryResult};
    use crate::remote::{AnalysisResponse, RemoteCallError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DOC: &str = "Quarterly memo\nRevenue: $3 million\nTeam: Ada (CEO)";

    struct CannedAnalysis {
        response: AnalysisResponse,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisService for CannedAnalysis {
        fn name(&self) -> &str {
            "canned"
        }

        async fn analyze(&self, _document: &str) -> Result<AnalysisResponse, RemoteCallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct EchoQa;

    #[async_trait]
    impl QaService for EchoQa {
        fn name(&self) -> &str {
            "echo"
        }

        async fn answer(&self, question: &str, _document: &str) -> Result<String, RemoteCallError> {
            Ok(format!("remote: {question}"))
        }
    }

    fn remote_analysis() -> AnalysisResult {
        AnalysisResult {
            document_type: Some("memo".to_string()),
            ..AnalysisResult::default()
        }
    }

    fn coordinator_with(response: AnalysisResponse) -> (Coordinator, Arc<CannedAnalysis>) {
        let analysis = Arc::new(CannedAnalysis {
            response,
            calls: AtomicUsize::new(0),
        });
        let services = RemoteServices {
            analysis: analysis.clone(),
            qa: Arc::new(EchoQa),
        };
        (
            Coordinator::new(services, FallbackProvider::default()),
            analysis,
        )
    }

    #[test]
    fn test_submit_rejects_blank_document() {
        let coordinator = Coordinator::new(RemoteServices::offline(), FallbackProvider::default());
        assert_eq!(coordinator.submit("").unwrap_err(), InputError::EmptyDocument);
        assert_eq!(
            coordinator.submit(" \n\t ").unwrap_err(),
            InputError::EmptyDocument
        );
    }

    #[test]
    fn test_submit_starts_in_coordinator_init_with_one_entry() {
        let coordinator = Coordinator::new(RemoteServices::offline(), FallbackProvider::default());
        let run = coordinator.submit(DOC).unwrap();
        assert_eq!(run.stage(), Stage::CoordinatorInit);
        assert_eq!(run.log_entries().len(), 1);
        assert_eq!(run.log_entries()[0].stage, Stage::CoordinatorInit);
    }

    #[tokio::test]
    async fn test_advance_walks_stages_in_order() {
        let (coordinator, _) = coordinator_with(AnalysisResponse {
            analysis: Some(remote_analysis()),
            summary: Some(SummaryResult::Text("short".to_string())),
        });
        let mut run = coordinator.submit(DOC).unwrap();

        assert_eq!(coordinator.advance(&mut run).await, Stage::Analysis);
        assert_eq!(coordinator.advance(&mut run).await, Stage::Summary);
        assert_eq!(coordinator.advance(&mut run).await, Stage::QaReady);
        assert_eq!(coordinator.advance(&mut run).await, Stage::QaReady);
    }

    #[tokio::test]
    async fn test_one_remote_call_feeds_analysis_and_summary() {
        let (coordinator, analysis) = coordinator_with(AnalysisResponse {
            analysis: Some(remote_analysis()),
            summary: Some(SummaryResult::Text("short".to_string())),
        });
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        assert_eq!(analysis.calls.load(Ordering::SeqCst), 1);
        let analysis_output = run.analysis().unwrap();
        assert_eq!(analysis_output.source, ResultSource::Remote);
        assert_eq!(analysis_output.value.document_type.as_deref(), Some("memo"));
        let summary_output = run.summary().unwrap();
        assert_eq!(summary_output.source, ResultSource::Remote);
        assert_eq!(summary_output.value, SummaryResult::Text("short".to_string()));
    }

    #[tokio::test]
    async fn test_partial_agent_failure_falls_back_per_stage() {
        let (coordinator, _) = coordinator_with(AnalysisResponse {
            analysis: Some(remote_analysis()),
            summary: None,
        });
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        assert_eq!(run.analysis().unwrap().source, ResultSource::Remote);
        let summary = run.summary().unwrap();
        assert!(summary.is_fallback());
        assert_eq!(summary.value, coordinator.fallback().summary());
        assert!(run
            .log_entries()
            .iter()
            .any(|e| e.stage == Stage::Summary && e.message.starts_with("Using fallback data")));
    }

    #[tokio::test]
    async fn test_offline_run_uses_fallback_everywhere() {
        let coordinator = Coordinator::new(RemoteServices::offline(), FallbackProvider::default());
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        assert!(run.is_qa_ready());
        assert_eq!(run.analysis().unwrap().value, coordinator.fallback().analysis());
        assert_eq!(run.summary().unwrap().value, coordinator.fallback().summary());

        let answer = coordinator.ask(&mut run, "What is the revenue?").await;
        assert!(answer.contains("$3 million"));
        assert_eq!(run.chat_history()[1].source, Some(ResultSource::Fallback));
    }

    #[tokio::test]
    async fn test_ask_before_qa_ready_returns_sentinel() {
        let (coordinator, _) = coordinator_with(AnalysisResponse::default());
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.advance(&mut run).await;

        let answer = coordinator.ask(&mut run, "What is the revenue?").await;
        assert_eq!(answer, NO_DOCUMENT_SENTINEL);
        assert!(run.chat_history().is_empty());
    }

    #[tokio::test]
    async fn test_ask_appends_user_and_assistant_turns() {
        let (coordinator, _) = coordinator_with(AnalysisResponse::default());
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        let answer = coordinator.ask(&mut run, "Who leads it?").await;
        assert_eq!(answer, "remote: Who leads it?");

        let history = run.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], ChatTurn::user("Who leads it?"));
        assert_eq!(
            history[1],
            ChatTurn::assistant("remote: Who leads it?", ResultSource::Remote)
        );
    }

    #[tokio::test]
    async fn test_ask_all_answers_in_order() {
        let (coordinator, _) = coordinator_with(AnalysisResponse::default());
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        let pairs = coordinator
            .ask_all(&mut run, &["Who leads it?", " ", "What is the revenue?"])
            .await;

        assert_eq!(
            pairs,
            vec![
                QaPair {
                    question: "Who leads it?".to_string(),
                    answer: "remote: Who leads it?".to_string(),
                },
                QaPair {
                    question: " ".to_string(),
                    answer: EMPTY_QUESTION_SENTINEL.to_string(),
                },
                QaPair {
                    question: "What is the revenue?".to_string(),
                    answer: "remote: What is the revenue?".to_string(),
                },
            ]
        );
        assert_eq!(run.chat_history().len(), 4);
        assert_eq!(run.chat_history()[2], ChatTurn::user("What is the revenue?"));
    }

    #[tokio::test]
    async fn test_ask_all_before_qa_ready_returns_sentinels() {
        let (coordinator, _) = coordinator_with(AnalysisResponse::default());
        let mut run = coordinator.submit(DOC).unwrap();

        let pairs = coordinator.ask_all(&mut run, &["a?", "b?"]).await;

        assert!(pairs.iter().all(|p| p.answer == NO_DOCUMENT_SENTINEL));
        assert!(run.chat_history().is_empty());
    }

    #[tokio::test]
    async fn test_blank_question_is_not_recorded() {
        let (coordinator, _) = coordinator_with(AnalysisResponse::default());
        let mut run = coordinator.submit(DOC).unwrap();
        coordinator.run_to_completion(&mut run).await;

        assert_eq!(coordinator.ask(&mut run, "   ").await, EMPTY_QUESTION_SENTINEL);
        assert!(run.chat_history().is_empty());
    }
}
