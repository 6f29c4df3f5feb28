//! Errors for PLA reading and writing

use std::fmt;
use std::io;

/// A malformed PLA document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PLAError {
    /// No `.i` directive and no row to infer the input count from.
    MissingInputDirective,
    /// No `.o` directive and no row to infer the output count from.
    MissingOutputDirective,
    /// A directive argument failed to parse.
    InvalidDirective {
        /// The directive, e.g. `.i`
        directive: String,
        /// The offending argument text
        value: String,
    },
    /// An input column holds something other than `0 1 - ~ x X`.
    InvalidInputCharacter {
        /// The offending character
        character: char,
        /// Column position within the inputs
        position: usize,
    },
    /// An output column holds something other than `0 1 2 3 4 - ~`.
    InvalidOutputCharacter {
        /// The offending character
        character: char,
        /// Column position within the outputs
        position: usize,
    },
    /// A cube row disagrees with the declared dimensions.
    RowWidthMismatch {
        /// Expected inputs + outputs
        expected: usize,
        /// Characters found
        actual: usize,
    },
    /// `.ilb` / `.ob` named a different number of variables than declared.
    LabelCountMismatch {
        /// "input" or "output"
        label_type: &'static str,
        /// The declared dimension
        expected: usize,
        /// Labels found
        actual: usize,
    },
}

impl fmt::Display for PLAError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAError::MissingInputDirective => {
                write!(f, "PLA is missing the .i directive")
            }
            PLAError::MissingOutputDirective => {
                write!(f, "PLA is missing the .o directive")
            }
            PLAError::InvalidDirective { directive, value } => {
                write!(f, "invalid {} argument {:?}", directive, value)
            }
            PLAError::InvalidInputCharacter {
                character,
                position,
            } => write!(
                f,
                "invalid input character {:?} at column {} (expected 0, 1 or -)",
                character, position
            ),
            PLAError::InvalidOutputCharacter {
                character,
                position,
            } => write!(
                f,
                "invalid output character {:?} at column {} (expected 0, 1, - or ~)",
                character, position
            ),
            PLAError::RowWidthMismatch { expected, actual } => write!(
                f,
                "cube row has {} characters, expected {}",
                actual, expected
            ),
            PLAError::LabelCountMismatch {
                label_type,
                expected,
                actual,
            } => write!(
                f,
                "{} label count mismatch: {} labels for {} variables",
                label_type, actual, expected
            ),
        }
    }
}

impl std::error::Error for PLAError {}

/// Failure reading a PLA document
#[derive(Debug)]
pub enum PLAReadError {
    /// Underlying I/O failed.
    Io(io::Error),
    /// The document itself is malformed.
    Format(PLAError),
}

impl fmt::Display for PLAReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAReadError::Io(err) => write!(f, "failed to read PLA: {}", err),
            PLAReadError::Format(err) => write!(f, "malformed PLA: {}", err),
        }
    }
}

impl std::error::Error for PLAReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PLAReadError::Io(err) => Some(err),
            PLAReadError::Format(err) => Some(err),
        }
    }
}

impl From<io::Error> for PLAReadError {
    fn from(err: io::Error) -> Self {
        PLAReadError::Io(err)
    }
}

impl From<PLAError> for PLAReadError {
    fn from(err: PLAError) -> Self {
        PLAReadError::Format(err)
    }
}

impl From<PLAReadError> for io::Error {
    fn from(err: PLAReadError) -> Self {
        match err {
            PLAReadError::Io(io_err) => io_err,
            PLAReadError::Format(format) => {
                io::Error::new(io::ErrorKind::InvalidData, format)
            }
        }
    }
}

/// Failure writing a PLA document
#[derive(Debug)]
pub enum PLAWriteError {
    /// Underlying I/O failed.
    Io(io::Error),
}

impl fmt::Display for PLAWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAWriteError::Io(err) => write!(f, "failed to write PLA: {}", err),
        }
    }
}

impl std::error::Error for PLAWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PLAWriteError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PLAWriteError {
    fn from(err: io::Error) -> Self {
        PLAWriteError::Io(err)
    }
}

impl From<PLAWriteError> for io::Error {
    fn from(err: PLAWriteError) -> Self {
        match err {
            PLAWriteError::Io(io_err) => io_err,
        }
    }
}
