use thiserror::Error;

/// Rejected input on submit. The pipeline does not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Document is empty")]
    EmptyDocument,
}
