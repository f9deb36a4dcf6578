//! DocuMind pipeline core.
//!
//! A document goes through four stages (coordinator-init, analysis, summary,
//! qa-ready). The analysis stage makes the run's one call to the hosted
//! analysis agent, whose response also carries the summary. Once a run is
//! qa-ready, questions go to the hosted QA agent. Whenever a remote call
//! fails, [`FallbackProvider`] supplies results of the same shape, so a run
//! always completes.

pub mod analysis;
pub mod config;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod remote;
pub mod sanitize;
pub mod secrets;
pub mod telemetry;

pub use analysis::{AnalysisResult, ResultSource, Sentiment, StageOutput, SummaryResult};
pub use config::{load_config, Config};
pub use error::{ConfigError, DocumindError, InputError, RemoteCallError, Result, SecretError};
pub use fallback::FallbackProvider;
pub use pipeline::{
    ChatTurn, Coordinator, PipelineRun, ProgressReporter, QaPair, Session, Stage,
    NO_DOCUMENT_SENTINEL,
};
pub use remote::{AnalysisService, QaService, RemoteServices};
