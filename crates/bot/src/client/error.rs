//! Error — the single error kind returned by the runtime facade.
//!
//! Messages are shown to chat users verbatim, so they carry no credentials.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The daemon could not be reached.
    #[error("Docker non accessibile: {0}")]
    Unavailable(String),
    /// No container matches the requested name or id.
    #[error("container non trovato: {0}")]
    NotFound(String),
    /// The daemon rejected the action.
    #[error("operazione rifiutata da Docker: {0}")]
    OperationFailed(String),
}

impl RuntimeError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RuntimeError::Unavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RuntimeError::NotFound(_))
    }
}
