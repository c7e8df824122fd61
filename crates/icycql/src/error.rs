use crate::query::Command;
use thiserror::Error as ThisError;

///
/// Error
///
/// Failure surface for statement rendering and execution. Rendering
/// failures are produced here; execution failures come from the session
/// collaborator and pass through unchanged.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// Rendering was requested for an unsupported or reserved command.
    #[error("invalid statement command: {0}")]
    InvalidCommand(Command),

    #[error(transparent)]
    Session(#[from] SessionError),
}

///
/// SessionError
///
/// Opaque failure reported by the external session (network, server-side,
/// decode). Never wrapped or reinterpreted by this core.
///

#[derive(Debug, ThisError)]
#[error(transparent)]
pub struct SessionError(Box<dyn std::error::Error + Send + Sync>);

impl SessionError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// Plain-message constructor for session implementations without a
    /// structured error of their own.
    pub fn message(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }
}
