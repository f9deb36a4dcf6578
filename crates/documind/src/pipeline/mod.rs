pub mod coordinator;
pub mod error;
pub mod progress;
pub mod run;
pub mod session;
pub mod stage;

pub use coordinator::{Coordinator, EMPTY_QUESTION_SENTINEL, NO_DOCUMENT_SENTINEL};
pub use error::InputError;
pub use progress::{
    BroadcastProgress, NoopProgress, ProgressEvent, ProgressReporter, StageEvent, StageEventKind,
};
pub use run::{ChatRole, ChatTurn, LogEntry, PipelineRun, QaPair, StageResult};
pub use session::Session;
pub use stage::Stage;
