use super::coordinator::{Coordinator, NO_DOCUMENT_SENTINEL};
use super::error::InputError;
use super::run::{PipelineRun, QaPair};
use super::stage::Stage;

/// A coordinator plus the run currently on screen, for front ends that
/// process one document at a time and keep answering questions about it.
///
/// Submitting a new document replaces the current run. A rejected submit
/// keeps the previous run exactly as it was.
pub struct Session {
    coordinator: Coordinator,
    current: Option<PipelineRun>,
}

impl Session {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            current: None,
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn current(&self) -> Option<&PipelineRun> {
        self.current.as_ref()
    }

    pub fn submit(&mut self, document: &str) -> Result<&PipelineRun, InputError> {
        let run = self.coordinator.submit(document)?;
        Ok(&*self.current.insert(run))
    }

    /// Advances the current run. `None` when nothing was submitted.
    pub async fn advance(&mut self) -> Option<Stage> {
        let run = self.current.as_mut()?;
        Some(self.coordinator.advance(run).await)
    }

    /// Submits `document` and runs it to `qa-ready`.
    pub async fn process(&mut self, document: &str) -> Result<&PipelineRun, InputError> {
        let mut run = self.coordinator.submit(document)?;
        self.coordinator.run_to_completion(&mut run).await;
        Ok(&*self.current.insert(run))
    }

    pub async fn ask(&mut self, question: &str) -> String {
        match self.current.as_mut() {
            Some(run) => self.coordinator.ask(run, question).await,
            None => NO_DOCUMENT_SENTINEL.to_string(),
        }
    }

    /// Answers each question about the current run, in order.
    pub async fn ask_all<Q: AsRef<str>>(&mut self, questions: &[Q]) -> Vec<QaPair> {
        match self.current.as_mut() {
            Some(run) => self.coordinator.ask_all(run, questions).await,
            None => questions
                .iter()
                .map(|q| QaPair {
                    question: q.as_ref().to_string(),
                    answer: NO_DOCUMENT_SENTINEL.to_string(),
                })
                .collect(),
        }
    }

    /// Drops the current run, chat history included.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
