//! Typed cube rows of a high-level [`Cover`](super::Cover)
//!
//! A row pairs an input pattern with an output pattern and a marker saying
//! which of the three sets (ON, don't-care, OFF) the row belongs to. Rows
//! are cheap to clone: the patterns sit behind `Arc` slices.

use std::sync::Arc;

/// Owned (inputs, outputs) pair, the shape `add_cube` accepts
pub type CubeData = (Vec<Option<bool>>, Vec<Option<bool>>);

/// Which set a cube row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeType {
    /// ON-set row (the function is 1 here)
    F,
    /// Don't-care row
    D,
    /// OFF-set row (the function is 0 here)
    R,
}

/// One row of a cover: an input pattern, an output pattern and a set marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    pub(crate) inputs: Arc<[Option<bool>]>,
    pub(crate) outputs: Arc<[bool]>,
    pub(crate) kind: CubeType,
}

impl Cube {
    pub(crate) fn new(inputs: &[Option<bool>], outputs: &[bool], kind: CubeType) -> Self {
        Cube {
            inputs: inputs.into(),
            outputs: outputs.into(),
            kind,
        }
    }

    /// Input pattern: `Some(false)` = 0, `Some(true)` = 1, `None` = don't care
    pub fn inputs(&self) -> &[Option<bool>] {
        &self.inputs
    }

    /// Output pattern: `true` means the bit is set in this row
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// The set this row belongs to
    pub fn cube_type(&self) -> CubeType {
        self.kind
    }
}
