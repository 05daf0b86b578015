//! Append-only event storage, one explicit open/write/close cycle per
//! event so each line is durable on its own.

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The log path does not exist and cannot be created.
    NotFound,
    /// The medium refused the operation.
    IoError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "log file not found"),
            StoreError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage writer consumed by the event recorder.
///
/// The recorder performs `open_append` -> `write_line` -> `close` for
/// every event, never holding a handle across poll iterations. `close`
/// must flush: once it returns `Ok`, the line survives power loss.
pub trait EventStore {
    type Handle;

    fn open_append(&mut self, path: &str) -> Result<Self::Handle, StoreError>;
    fn write_line(&mut self, handle: &mut Self::Handle, line: &str) -> Result<(), StoreError>;
    fn close(&mut self, handle: Self::Handle) -> Result<(), StoreError>;
}
