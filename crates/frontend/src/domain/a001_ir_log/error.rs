use contracts::domain::a001_ir_log::IrLogId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Network failure, non-2xx status or an undecodable response
    #[error("{0}")]
    Transport(String),

    /// Client-side check that blocks a request before it is sent
    #[error("validation failed: {0}")]
    Validation(String),

    /// Another log is already open in the editor
    #[error("log {0} is already being edited")]
    Conflict(IrLogId),

    #[error("log {0} not found")]
    NotFound(IrLogId),

    #[error("no edit session is open")]
    NoSession,
}
