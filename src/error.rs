//! Error types for the engine and its persistence layer.

use std::fmt;

/// Errors raised by the move engine.
///
/// Both variants are caller mistakes: the engine itself never fails once it
/// holds a valid board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A direction code or name that does not map to Up, Down, Left or Right.
    InvalidDirection {
        /// The rejected input, as received.
        input: String,
    },
    /// A cell value that is neither empty nor a power of two of at least 2.
    InvalidCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: u32,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection { input } => write!(f, "invalid direction: {input:?}"),
            Self::InvalidCell { row, col, value } => {
                write!(f, "invalid cell value {value} at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors raised while loading or saving game state.
///
/// None of these are fatal: a session recovers from each of them by starting
/// fresh or by carrying on without saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Stored state exists but cannot be decoded or fails validation.
    CorruptState(String),
    /// The backing store could not be read or written.
    StorageUnavailable(String),
    /// A key the store refuses to map onto its backend.
    InvalidKey(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptState(reason) => write!(f, "corrupt saved state: {reason}"),
            Self::StorageUnavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: {key:?}"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::CorruptState(e.to_string())
    }
}

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;
