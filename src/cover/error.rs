//! Errors specific to the high-level cover API

use std::fmt;
use std::io;

/// Failure converting a cover column back to a boolean expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToExprError {
    /// The named output does not exist in this cover.
    UnknownOutput {
        /// The label that was requested
        label: String,
    },
}

impl fmt::Display for ToExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToExprError::UnknownOutput { label } => {
                write!(f, "cover has no output named {:?}", label)
            }
        }
    }
}

impl std::error::Error for ToExprError {}

impl From<ToExprError> for io::Error {
    fn from(err: ToExprError) -> Self {
        io::Error::new(io::ErrorKind::NotFound, err)
    }
}
