//! The [`Minimizable`] trait and the bridge to the native core
//!
//! Lowering turns cover rows into bit-packed core cube sets, derives
//! whichever of (F, D, R) the cover type left implicit — any two determine
//! the third, by complement — and lifting turns the minimized ON-set back
//! into rows while carrying the original don't-care and OFF rows along.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::cubes::CubeType;
use super::dnf::Dnf;
use super::{Cover, CoverType};
use crate::error::MinimizationError;
use crate::espresso::{self, Cube as CoreCube, CubeLayout, CubeSet, EspressoConfig};

/// Types that can be minimized by the core
///
/// All methods take `&self` and return a new minimized instance. The default
/// methods run with [`EspressoConfig::default()`].
///
/// # Example
///
/// ```
/// use ristretto_logic::{BoolExpr, Minimizable};
///
/// # fn main() -> std::io::Result<()> {
/// let expr = BoolExpr::parse("a * b + a * b * c")?;
/// let minimized = expr.minimize()?;
/// assert_eq!(minimized.to_string(), "a * b");
/// # Ok(())
/// # }
/// ```
pub trait Minimizable {
    /// Heuristic minimization with the default configuration
    fn minimize(&self) -> Result<Self, MinimizationError>
    where
        Self: Sized,
    {
        self.minimize_with_config(&EspressoConfig::default())
    }

    /// Heuristic minimization
    fn minimize_with_config(&self, config: &EspressoConfig) -> Result<Self, MinimizationError>
    where
        Self: Sized;

    /// Exact minimization with the default configuration
    fn minimize_exact(&self) -> Result<Self, MinimizationError>
    where
        Self: Sized,
    {
        self.minimize_exact_with_config(&EspressoConfig::default())
    }

    /// Exact minimization: the result has the minimum possible cube count
    fn minimize_exact_with_config(
        &self,
        config: &EspressoConfig,
    ) -> Result<Self, MinimizationError>
    where
        Self: Sized;
}

impl Minimizable for Cover {
    fn minimize_with_config(&self, config: &EspressoConfig) -> Result<Self, MinimizationError> {
        let Some((f, d, r)) = lower(self) else {
            return Ok(self.clone());
        };
        let solution = espresso::minimize_heuristic(f, d, r, config)?;
        Ok(lift(self, solution.cover))
    }

    fn minimize_exact_with_config(
        &self,
        config: &EspressoConfig,
    ) -> Result<Self, MinimizationError> {
        let Some((f, d, r)) = lower(self) else {
            return Ok(self.clone());
        };
        let solution = espresso::minimize_exact(f, d, r, config)?;
        Ok(lift(self, solution.cover))
    }
}

/// Lower a cover to core (F, D, R) sets, deriving the missing one
///
/// Returns `None` when the cover has no outputs (nothing to minimize).
pub(super) fn lower(cover: &Cover) -> Option<(CubeSet, CubeSet, CubeSet)> {
    if cover.num_outputs() == 0 {
        return None;
    }
    let layout = CubeLayout::binary(cover.num_inputs(), cover.num_outputs());
    let mut f = CubeSet::new(Arc::clone(&layout));
    let mut d = CubeSet::new(Arc::clone(&layout));
    let mut r = CubeSet::new(Arc::clone(&layout));

    for row in cover.rows() {
        // Rows asserting no output denote nothing.
        if !row.outputs().iter().any(|&b| b) {
            continue;
        }
        let cube = row_to_core(row.inputs(), row.outputs(), &layout);
        match row.cube_type() {
            CubeType::F => f.push(cube),
            CubeType::D => d.push(cube),
            CubeType::R => r.push(cube),
        }
    }

    match cover.cover_type() {
        CoverType::F => {
            r = f.complement();
        }
        CoverType::FD => {
            let mut fd = f.clone();
            fd.extend_from(&d);
            r = fd.complement();
        }
        CoverType::FR => {
            let mut fr = f.clone();
            fr.extend_from(&r);
            d = fr.complement();
        }
        CoverType::FDR => {}
    }

    Some((f, d, r))
}

/// Rebuild a cover around a minimized core ON-set
///
/// The don't-care and OFF rows of the original ride along unchanged when the
/// cover type carries them.
pub(super) fn lift(original: &Cover, minimized: CubeSet) -> Cover {
    let layout = Arc::clone(minimized.layout());
    let mut rows: Vec<super::Cube> = minimized
        .iter()
        .map(|c| core_to_row(c, &layout))
        .collect();
    for row in original.rows() {
        match row.cube_type() {
            CubeType::D if original.cover_type().has_d() => rows.push(row.clone()),
            CubeType::R if original.cover_type().has_r() => rows.push(row.clone()),
            _ => {}
        }
    }
    Cover::from_parts(
        original.num_inputs(),
        original.num_outputs(),
        original.input_labels().to_vec(),
        original.output_labels().to_vec(),
        rows,
        original.cover_type(),
    )
}

fn row_to_core(inputs: &[Option<bool>], outputs: &[bool], layout: &CubeLayout) -> CoreCube {
    let mut cube = CoreCube::zero(layout);
    for (var, &value) in inputs.iter().enumerate() {
        let first = layout.var_first(var);
        match value {
            Some(false) => cube.set(first),
            Some(true) => cube.set(first + 1),
            None => {
                cube.set(first);
                cube.set(first + 1);
            }
        }
    }
    let out_first = layout.var_first(layout.output_var());
    for (k, &bit) in outputs.iter().enumerate() {
        if bit {
            cube.set(out_first + k);
        }
    }
    cube
}

fn core_to_row(cube: &CoreCube, layout: &CubeLayout) -> super::Cube {
    let inputs: Vec<Option<bool>> = (0..layout.num_inputs())
        .map(|var| {
            let first = layout.var_first(var);
            match (cube.get(first), cube.get(first + 1)) {
                (true, true) => None,
                (false, true) => Some(true),
                (true, false) => Some(false),
                // An empty field never leaves the core.
                (false, false) => unreachable!("core cube with empty input field"),
            }
        })
        .collect();
    let out_first = layout.var_first(layout.output_var());
    let outputs: Vec<bool> = (0..layout.num_outputs())
        .map(|k| cube.get(out_first + k))
        .collect();
    super::Cube::new(&inputs, &outputs, CubeType::F)
}

/// Minimize a single-output function given as a [`Dnf`]
///
/// Used by the expression front end: variables become cover inputs in the
/// Dnf's sorted order, and the result converts straight back.
pub(crate) fn minimize_dnf(
    dnf: &Dnf,
    config: &EspressoConfig,
    exact: bool,
) -> Result<Dnf, MinimizationError> {
    let variables = dnf.variables().to_vec();
    let names: Vec<&str> = variables.iter().map(|v| v.as_ref()).collect();
    let mut cover = Cover::with_labels(CoverType::F, &names, &["out"]);
    for product in dnf.cubes() {
        let mut inputs = vec![None; variables.len()];
        for (i, var) in variables.iter().enumerate() {
            if let Some(&polarity) = product.get(var) {
                inputs[i] = Some(polarity);
            }
        }
        cover.add_cube(&inputs, &[Some(true)]);
    }
    let minimized = if exact {
        cover.minimize_exact_with_config(config)?
    } else {
        cover.minimize_with_config(config)?
    };
    Ok(cover_to_dnf(&minimized))
}

/// Read the ON-set rows of a cover back into a [`Dnf`]
pub(crate) fn cover_to_dnf(cover: &Cover) -> Dnf {
    let mut products = Vec::new();
    for row in cover.rows() {
        if row.cube_type() != CubeType::F {
            continue;
        }
        let mut product = BTreeMap::new();
        for (i, &literal) in row.inputs().iter().enumerate() {
            if let Some(polarity) = literal {
                let name = match cover.input_label(i) {
                    Some(label) => Arc::clone(label),
                    None => Arc::from(format!("x{}", i).as_str()),
                };
                product.insert(name, polarity);
            }
        }
        products.push(product);
    }
    Dnf::from_cubes(products)
}
