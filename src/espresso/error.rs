//! Error types surfaced by the minimizer core
//!
//! Transformation primitives assert their preconditions on owned data and
//! never recover; the variants here are the conditions the driver reports to
//! callers. `SoftTimeout` is not an error — an expired deadline still yields
//! a valid cover, flagged through [`MinimizeStatus`].

use std::fmt;
use std::io;

use super::cube::Cube;

/// Fatal conditions reported by the core entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    /// A cube has an empty variable field, or the input covers disagree on
    /// their layout.
    InvalidInput {
        /// Human-readable description of the violation
        detail: String,
    },
    /// The ON-set and OFF-set share at least one point. Detected before any
    /// transformation runs.
    OffsetConflict {
        /// A cube inside the shared region
        witness: Cube,
    },
    /// The result failed to cover some original ON-set point. Indicates an
    /// internal bug; the driver aborts rather than return a wrong cover.
    CoverageGap {
        /// An uncovered region
        witness: Cube,
    },
    /// The exact solver's covering table outgrew the configured ceiling.
    /// Callers may retry heuristically.
    LimitExceeded {
        /// The ceiling that was hit
        limit: usize,
    },
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::InvalidInput { detail } => {
                write!(f, "invalid input cover: {}", detail)
            }
            MinimizeError::OffsetConflict { witness } => write!(
                f,
                "the ON-set and OFF-set intersect (witness {:?})",
                witness
            ),
            MinimizeError::CoverageGap { witness } => write!(
                f,
                "internal error: result does not cover the ON-set (gap at {:?})",
                witness
            ),
            MinimizeError::LimitExceeded { limit } => write!(
                f,
                "covering table exceeded the configured limit of {} entries",
                limit
            ),
        }
    }
}

impl std::error::Error for MinimizeError {}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        let kind = match err {
            MinimizeError::InvalidInput { .. } | MinimizeError::OffsetConflict { .. } => {
                io::ErrorKind::InvalidData
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

/// Completion status attached to a minimization result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeStatus {
    /// The algorithm ran to convergence.
    Complete,
    /// The deadline expired; the attached cover is the best found so far and
    /// is still a valid cover of the ON-set.
    SoftTimeout,
}

impl MinimizeStatus {
    /// True when the run finished without hitting the deadline
    pub fn is_complete(self) -> bool {
        matches!(self, MinimizeStatus::Complete)
    }
}
