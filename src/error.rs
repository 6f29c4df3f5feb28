//! Error types shared across the crate's public surface
//!
//! Every error source gets its own enum with hand-written `Display` and
//! `Error` impls, plus a bridge into `io::Error` so the whole API can be
//! driven from functions returning `std::io::Result`. The core's own error
//! kinds live in [`crate::espresso::error`]; PLA I/O errors in
//! [`crate::pla`]; this module holds the ones spanning layers.

use std::fmt;
use std::io;

use crate::espresso::MinimizeError;

/// Failure of a [`Minimizable`](crate::Minimizable) operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizationError {
    /// The core rejected or aborted the problem.
    Core(MinimizeError),
}

impl fmt::Display for MinimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizationError::Core(err) => write!(f, "minimization failed: {}", err),
        }
    }
}

impl std::error::Error for MinimizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizationError::Core(err) => Some(err),
        }
    }
}

impl From<MinimizeError> for MinimizationError {
    fn from(err: MinimizeError) -> Self {
        MinimizationError::Core(err)
    }
}

impl From<MinimizationError> for io::Error {
    fn from(err: MinimizationError) -> Self {
        match err {
            MinimizationError::Core(core) => core.into(),
        }
    }
}

/// Failure parsing a boolean expression string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoolExprError {
    /// Parser message
    message: String,
    /// The input that failed to parse
    input: String,
    /// Byte offset of the failure, when known
    position: Option<usize>,
}

impl ParseBoolExprError {
    pub(crate) fn new<T: fmt::Display, E: fmt::Display>(
        input: &str,
        err: lalrpop_util::ParseError<usize, T, E>,
    ) -> Self {
        use lalrpop_util::ParseError::*;
        let position = match &err {
            InvalidToken { location } => Some(*location),
            UnrecognizedEof { location, .. } => Some(*location),
            UnrecognizedToken { token, .. } => Some(token.0),
            ExtraToken { token } => Some(token.0),
            User { .. } => None,
        };
        ParseBoolExprError {
            message: err.to_string(),
            input: input.to_string(),
            position,
        }
    }

    /// Byte offset of the failure, when the parser could pin one down
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for ParseBoolExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(
                f,
                "failed to parse boolean expression at offset {}: {} (input: {:?})",
                pos, self.message, self.input
            ),
            None => write!(
                f,
                "failed to parse boolean expression: {} (input: {:?})",
                self.message, self.input
            ),
        }
    }
}

impl std::error::Error for ParseBoolExprError {}

impl From<ParseBoolExprError> for io::Error {
    fn from(err: ParseBoolExprError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
