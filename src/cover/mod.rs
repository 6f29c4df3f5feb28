//! High-level covers: dynamic dimensions, labels, typed rows
//!
//! A [`Cover`] is the friendly face of the minimizer: a list of cube rows
//! over named input and output variables, growing its dimensions as rows are
//! added. Each row is tagged with the set it belongs to — ON-set, don't-care
//! or OFF-set — and the [`CoverType`] records which sets this cover carries.
//!
//! Minimization lowers the rows to the bit-packed core representation,
//! derives whichever of the three sets the cover type omitted (any two
//! determine the third), runs the native engine, and lifts the result back.
//! See [`Minimizable`] for the entry points.
//!
//! # Cover types
//!
//! - **F** — ON-set only; the OFF-set is everything else
//! - **FD** — ON-set plus don't-cares
//! - **FR** — ON-set plus explicit OFF-set
//! - **FDR** — all three sets spelled out
//!
//! # Example
//!
//! ```
//! use ristretto_logic::{Cover, CoverType, Minimizable};
//!
//! // XOR: 01 -> 1, 10 -> 1
//! let mut cover = Cover::new(CoverType::F);
//! cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
//! cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
//!
//! let minimized = cover.minimize().unwrap();
//! assert_eq!(minimized.num_cubes(), 2); // XOR cannot shrink
//! ```

mod cubes;
mod dnf;
pub mod error;
mod expressions;
mod iterators;
mod labels;
mod minimisation;

pub use cubes::{Cube, CubeData, CubeType};
pub use dnf::Dnf;
pub use error::ToExprError;
pub use iterators::CubesIter;
pub use minimisation::Minimizable;

pub(crate) use minimisation::minimize_dnf;

use std::sync::Arc;

use crate::espresso::{self, CheckOutcome, MinimizeError};
use labels::Labels;

/// Which of the three sets a cover carries explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverType {
    /// ON-set only
    F,
    /// ON-set and don't-care set
    FD,
    /// ON-set and OFF-set
    FR,
    /// ON-set, don't-care set and OFF-set
    FDR,
}

impl CoverType {
    /// True: every cover type carries the ON-set
    pub fn has_f(&self) -> bool {
        true
    }

    /// True when the type carries a don't-care set
    pub fn has_d(&self) -> bool {
        matches!(self, CoverType::FD | CoverType::FDR)
    }

    /// True when the type carries an explicit OFF-set
    pub fn has_r(&self) -> bool {
        matches!(self, CoverType::FR | CoverType::FDR)
    }
}

/// A Boolean function as a table of cube rows
///
/// Dimensions grow automatically: adding a wider row pads every existing row
/// with don't-cares (inputs) or unset bits (outputs). Labels are optional
/// and backfilled with `x{i}` / `y{i}` names when needed.
///
/// `Cover` is `Send + Sync`; minimization runs entirely on owned data.
#[derive(Debug, Clone)]
pub struct Cover {
    num_inputs: usize,
    num_outputs: usize,
    input_labels: Labels,
    output_labels: Labels,
    rows: Vec<Cube>,
    cover_type: CoverType,
}

impl Cover {
    /// New empty cover of the given type
    pub fn new(cover_type: CoverType) -> Self {
        Cover {
            num_inputs: 0,
            num_outputs: 0,
            input_labels: Labels::new('x'),
            output_labels: Labels::new('y'),
            rows: Vec::new(),
            cover_type,
        }
    }

    /// New cover with the variable names fixed up front
    pub fn with_labels<S: AsRef<str>>(
        cover_type: CoverType,
        input_labels: &[S],
        output_labels: &[S],
    ) -> Self {
        let inputs: Vec<Arc<str>> = input_labels.iter().map(|s| Arc::from(s.as_ref())).collect();
        let outputs: Vec<Arc<str>> = output_labels.iter().map(|s| Arc::from(s.as_ref())).collect();
        Cover {
            num_inputs: inputs.len(),
            num_outputs: outputs.len(),
            input_labels: Labels::from_names('x', inputs),
            output_labels: Labels::from_names('y', outputs),
            rows: Vec::new(),
            cover_type,
        }
    }

    pub(crate) fn from_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        rows: Vec<Cube>,
        cover_type: CoverType,
    ) -> Self {
        Cover {
            num_inputs,
            num_outputs,
            input_labels: Labels::from_names('x', input_labels),
            output_labels: Labels::from_names('y', output_labels),
            rows,
            cover_type,
        }
    }

    /// Number of input variables
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of outputs
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Cover type (which sets this cover carries)
    pub fn cover_type(&self) -> CoverType {
        self.cover_type
    }

    /// Number of ON-set rows (all rows for FR/FDR covers, matching the
    /// classic tool's accounting)
    pub fn num_cubes(&self) -> usize {
        if self.cover_type.has_r() {
            self.rows.len()
        } else {
            self.rows
                .iter()
                .filter(|c| c.cube_type() == CubeType::F)
                .count()
        }
    }

    /// Input variable names
    pub fn input_labels(&self) -> &[Arc<str>] {
        self.input_labels.as_slice()
    }

    /// Output variable names
    pub fn output_labels(&self) -> &[Arc<str>] {
        self.output_labels.as_slice()
    }

    pub(crate) fn input_label(&self, position: usize) -> Option<&Arc<str>> {
        self.input_labels.get(position)
    }

    pub(crate) fn input_position(&self, name: &str) -> Option<usize> {
        self.input_labels.position(name)
    }

    pub(crate) fn output_position(&self, name: &str) -> Option<usize> {
        self.output_labels.position(name)
    }

    pub(crate) fn rows(&self) -> &[Cube] {
        &self.rows
    }

    pub(crate) fn push_row(&mut self, row: Cube) {
        self.rows.push(row);
    }

    /// Iterate over the rows visible for this cover type
    pub fn cubes(&self) -> CubesIter<'_, &Cube> {
        let cover_type = self.cover_type;
        CubesIter {
            iter: Box::new(self.rows.iter().filter(move |c| {
                cover_type != CoverType::F || c.cube_type() == CubeType::F
            })),
        }
    }

    /// Iterate over rows as owned `(inputs, outputs)` data
    pub fn cubes_iter(&self) -> CubesIter<'_, CubeData> {
        let cover_type = self.cover_type;
        CubesIter {
            iter: Box::new(
                self.rows
                    .iter()
                    .filter(move |c| cover_type != CoverType::F || c.cube_type() == CubeType::F)
                    .map(|c| {
                        let inputs = c.inputs().to_vec();
                        let outputs = c.outputs().iter().map(|&b| Some(b)).collect();
                        (inputs, outputs)
                    }),
            ),
        }
    }

    /// Add one truth-table row
    ///
    /// Outputs follow the PLA reading convention: `Some(true)` lands in the
    /// ON-set, `Some(false)` in the OFF-set (when the type carries one) and
    /// `None` in the don't-care set (likewise). A single call can therefore
    /// produce up to three rows.
    pub fn add_cube(&mut self, inputs: &[Option<bool>], outputs: &[Option<bool>]) {
        self.grow_to_fit(inputs.len(), outputs.len());

        let mut padded_inputs = inputs.to_vec();
        padded_inputs.resize(self.num_inputs, None);
        let mut padded_outputs = outputs.to_vec();
        padded_outputs.resize(self.num_outputs, None);

        let mut f_bits = vec![false; self.num_outputs];
        let mut d_bits = vec![false; self.num_outputs];
        let mut r_bits = vec![false; self.num_outputs];
        let (mut has_f, mut has_d, mut has_r) = (false, false, false);
        for (k, &out) in padded_outputs.iter().enumerate() {
            match out {
                Some(true) => {
                    f_bits[k] = true;
                    has_f = true;
                }
                Some(false) if self.cover_type.has_r() => {
                    r_bits[k] = true;
                    has_r = true;
                }
                None if self.cover_type.has_d() => {
                    d_bits[k] = true;
                    has_d = true;
                }
                _ => {}
            }
        }

        if has_f {
            self.rows.push(Cube::new(&padded_inputs, &f_bits, CubeType::F));
        }
        if has_d {
            self.rows.push(Cube::new(&padded_inputs, &d_bits, CubeType::D));
        }
        if has_r {
            self.rows.push(Cube::new(&padded_inputs, &r_bits, CubeType::R));
        }
    }

    /// Grow to at least the given dimensions, padding existing rows
    pub(crate) fn grow_to_fit(&mut self, min_inputs: usize, min_outputs: usize) {
        if min_inputs > self.num_inputs {
            self.num_inputs = min_inputs;
            for row in &mut self.rows {
                let mut inputs = row.inputs.to_vec();
                inputs.resize(self.num_inputs, None);
                row.inputs = inputs.into();
            }
            if !self.input_labels.is_empty() {
                self.input_labels.fill_to(self.num_inputs);
            }
        }
        if min_outputs > self.num_outputs {
            self.num_outputs = min_outputs;
            for row in &mut self.rows {
                let mut outputs = row.outputs.to_vec();
                outputs.resize(self.num_outputs, false);
                row.outputs = outputs.into();
            }
            if !self.output_labels.is_empty() {
                self.output_labels.fill_to(self.num_outputs);
            }
        }
    }

    /// One EXPAND + IRREDUNDANT pass over the ON-set
    ///
    /// Cheaper than a full [`Minimizable::minimize`]; removes single-cube
    /// containment and obvious redundancy without iterating.
    pub fn simplify(&self) -> Result<Cover, crate::error::MinimizationError> {
        let Some((f, d, r)) = minimisation::lower(self) else {
            return Ok(self.clone());
        };
        let cover = espresso::simplify(f, d, r)?;
        Ok(minimisation::lift(self, cover))
    }

    /// Verify that the cover's three sets partition the space
    ///
    /// For F/FD/FR covers the derived set closes the partition by
    /// construction, so this mainly guards FDR covers read from files.
    pub fn check(&self) -> Result<CheckOutcome, MinimizeError> {
        let Some((f, d, r)) = minimisation::lower(self) else {
            return Ok(CheckOutcome::Ok);
        };
        espresso::check(&f, &d, &r)
    }
}

impl Default for Cover {
    fn default() -> Self {
        Self::new(CoverType::F)
    }
}

#[cfg(test)]
mod tests;
