//! The native minimizer core: cube algebra, phases, and the driver
//!
//! This module owns the algorithmic heart of the crate. Problems enter as
//! three [`CubeSet`]s over a shared [`CubeLayout`] — the ON-set F, the
//! don't-care set D and the OFF-set R — and leave as a new ON-set cover with
//! fewer cubes, then fewer literals. Any two of the three sets determine the
//! third; the high-level [`Cover`](crate::Cover) API derives whichever one
//! its input format omitted before calling down here.
//!
//! # Entry points
//!
//! - [`minimize_heuristic`] — the EXPAND / IRREDUNDANT / REDUCE iteration
//!   with essential-prime peeling and a gasp phase to escape local minima
//! - [`minimize_exact`] — all primes, a covering table, branch-and-bound on
//!   the cyclic core; guaranteed minimum cube count
//! - [`simplify`] — a single EXPAND + IRREDUNDANT pass
//! - [`check`] — consistency verification of an (F, D, R) triple
//!
//! # Determinism
//!
//! Identical inputs produce bit-identical, identically ordered results on
//! every platform. All internal orderings derive from the total order on
//! cube bit vectors or from explicit index order; nothing iterates a hash
//! map. The only sanctioned nondeterminism is the wall-clock deadline, which
//! never changes a result, only how far the search got before returning it.
//!
//! # Example
//!
//! ```
//! use ristretto_logic::espresso::{self, CubeLayout, CubeSet, Cube, EspressoConfig};
//!
//! // f = x0'x1 + x0x1'  over 2 inputs, 1 output (XOR)
//! let layout = CubeLayout::binary(2, 1);
//! let mut f = CubeSet::new(layout.clone());
//! let mut c = Cube::full(&layout);
//! c.fix_var(0, 0, &layout);
//! c.fix_var(1, 1, &layout);
//! f.push(c);
//! let mut c = Cube::full(&layout);
//! c.fix_var(0, 1, &layout);
//! c.fix_var(1, 0, &layout);
//! f.push(c);
//!
//! let d = CubeSet::new(layout.clone());
//! let r = f.complement();
//! let solution = espresso::minimize_heuristic(f, d, r, &EspressoConfig::default()).unwrap();
//! assert_eq!(solution.cover.len(), 2); // XOR does not simplify
//! ```

pub mod cover;
pub mod cube;
pub mod error;

mod essential;
mod exact;
mod expand;
mod gasp;
mod irredundant;
mod matrix;
mod reduce;

use std::sync::Arc;
use std::time::{Duration, Instant};

pub use cover::CubeSet;
pub use cube::{Cube, CubeLayout};
pub use error::{MinimizeError, MinimizeStatus};
pub use matrix::{CoverMatrix, MinCover};

use essential::split_essential;
use exact::exact_cover;
use expand::expand;
use gasp::{last_gasp, super_gasp};
use irredundant::irredundant;
use reduce::reduce;

/// How hard the heuristic driver works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Full iteration plus one LAST_GASP round.
    #[default]
    Default,
    /// One single-pass EXPAND and one IRREDUNDANT; no iteration, no gasp.
    Fast,
    /// Full iteration plus SUPER_GASP (gasp until it stops paying).
    Strong,
}

/// Configuration for the minimizer core
///
/// A plain options struct passed once into the entry points; the core reads
/// no process-wide state. The defaults match the classic tool's defaults.
///
/// # Examples
///
/// ```
/// use ristretto_logic::espresso::{EspressoConfig, Strategy};
///
/// let mut config = EspressoConfig::default();
/// config.strategy = Strategy::Fast; // one expand pass, ~larger result
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspressoConfig {
    /// Effort level: `Default`, `Fast` (single expand pass) or `Strong`
    /// (SUPER_GASP).
    pub strategy: Strategy,

    /// Split multi-output cubes into single-output cubes before minimizing.
    /// EXPAND re-merges outputs where that pays.
    ///
    /// **Default:** `true`
    pub unwrap_onset: bool,

    /// Derive the ON-set from the don't-care and OFF-sets before starting,
    /// discarding the caller's F.
    ///
    /// **Default:** `false`
    pub recompute_onset: bool,

    /// Peel essential primes after the first IRREDUNDANT pass. They are
    /// provably part of every minimal cover, so the loop need not touch
    /// them again.
    ///
    /// **Default:** `true`
    pub detect_essentials: bool,

    /// Run a final IRREDUNDANT after the essentials rejoin the cover. With
    /// `false` the result may retain redundancy introduced by the reunion.
    ///
    /// **Default:** `true`
    pub final_irredundant: bool,

    /// Minimize the OFF-set instead: F and R swap on entry, and the result
    /// is a cover of the complement.
    ///
    /// **Default:** `false`
    pub swap_on_off: bool,

    /// Process REDUCE in ascending weight order instead of descending.
    /// Deterministic; occasionally shakes loose a different local minimum.
    ///
    /// **Default:** `false`
    pub reverse_reduce_order: bool,

    /// Wall-clock budget. Checked at the top of each driver iteration and
    /// at each branch-and-bound node; on expiry the best cover found so far
    /// is returned with [`MinimizeStatus::SoftTimeout`].
    ///
    /// **Default:** `None` (run to convergence)
    pub deadline: Option<Duration>,

    /// Ceiling on the exact solver's prime count and covering-table columns.
    /// Exceeding it aborts with [`MinimizeError::LimitExceeded`].
    ///
    /// **Default:** `262_144`
    pub table_limit: usize,

    /// Print phase transitions and costs to stderr.
    ///
    /// **Default:** `false`
    pub trace: bool,

    /// With `trace`, also dump the cover's cubes after each phase. Verbose;
    /// meant for debugging the algorithm itself.
    ///
    /// **Default:** `false`
    pub debug: bool,

    /// Print a one-line summary to stderr when a run completes.
    ///
    /// **Default:** `false`
    pub summary: bool,
}

impl Default for EspressoConfig {
    fn default() -> Self {
        EspressoConfig {
            strategy: Strategy::Default,
            unwrap_onset: true,
            recompute_onset: false,
            detect_essentials: true,
            final_irredundant: true,
            swap_on_off: false,
            reverse_reduce_order: false,
            deadline: None,
            table_limit: 262_144,
            trace: false,
            debug: false,
            summary: false,
        }
    }
}

impl EspressoConfig {
    /// Create a configuration with the defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counters a run leaves behind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Driver iterations of the REDUCE / EXPAND / IRREDUNDANT loop.
    pub iterations: u32,
    /// Cost (cubes, literals) on entry.
    pub initial_cost: (u64, u64),
    /// Cost (cubes, literals) of the result.
    pub final_cost: (u64, u64),
    /// Essential primes peeled off.
    pub essentials: u64,
}

/// A minimization result: the cover plus how the run ended
#[derive(Debug, Clone)]
pub struct Solution {
    /// The minimized ON-set cover, canonically ordered.
    pub cover: CubeSet,
    /// Whether the run converged or hit the deadline.
    pub status: MinimizeStatus,
    /// Run counters.
    pub stats: Stats,
}

/// Outcome of [`check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The triple partitions the space.
    Ok,
    /// F, D and R together miss this region.
    CoverageGap(Cube),
    /// F and R overlap in this region.
    OffsetConflict(Cube),
}

/// Explicit per-run state threaded through the driver
struct Context<'a> {
    config: &'a EspressoConfig,
    deadline: Option<Instant>,
    stats: Stats,
}

impl<'a> Context<'a> {
    fn new(config: &'a EspressoConfig) -> Self {
        Context {
            config,
            deadline: config.deadline.map(|d| Instant::now() + d),
            stats: Stats::default(),
        }
    }

    fn expired(&self) -> bool {
        matches!(self.deadline, Some(limit) if Instant::now() >= limit)
    }

    fn trace(&self, phase: &str, cover: &CubeSet) {
        if self.config.trace {
            let (cubes, literals) = cover.cost();
            eprintln!("# {:<12} {} cubes, {} literals", phase, cubes, literals);
            if self.config.debug {
                for cube in cover.iter() {
                    eprintln!("#   {:?}", cube);
                }
            }
        }
    }
}

/// Heuristically minimize the cover triple (F, D, R)
///
/// Returns a new ON-set F' with F ⊆ F' ⊆ F ∪ D, never more cubes than F,
/// and no intersection with R. See the module docs for the phase structure.
pub fn minimize_heuristic(
    f: CubeSet,
    d: CubeSet,
    r: CubeSet,
    config: &EspressoConfig,
) -> Result<Solution, MinimizeError> {
    let (f, d, r) = prepare(f, d, r, config)?;
    let mut ctx = Context::new(config);
    ctx.stats.initial_cost = f.cost();
    let original = f.clone();

    let mut dc = d.clone();
    let single = config.strategy == Strategy::Fast;
    let mut cover = expand(f, &r, single);
    ctx.trace("expand", &cover);
    cover = irredundant(cover, &dc);
    ctx.trace("irredundant", &cover);

    let essentials = if config.detect_essentials {
        let (ess, rest) = split_essential(cover, &dc);
        ctx.stats.essentials = ess.len() as u64;
        dc.extend_from(&ess);
        cover = rest;
        ess
    } else {
        CubeSet::new(Arc::clone(cover.layout()))
    };

    let mut status = MinimizeStatus::Complete;
    if config.strategy != Strategy::Fast {
        // Inner loop to convergence, then a gasp; an improving gasp sends
        // the whole cycle around again.
        'outer: loop {
            let mut cost = cover.cost();
            loop {
                if ctx.expired() {
                    status = MinimizeStatus::SoftTimeout;
                    break 'outer;
                }
                ctx.stats.iterations += 1;
                cover = reduce(cover, &dc, config.reverse_reduce_order);
                ctx.trace("reduce", &cover);
                cover = expand(cover, &r, false);
                ctx.trace("expand", &cover);
                cover = irredundant(cover, &dc);
                ctx.trace("irredundant", &cover);
                let next = cover.cost();
                if next < cost {
                    cost = next;
                } else {
                    break;
                }
            }
            let before_gasp = cover.cost();
            cover = match config.strategy {
                Strategy::Strong => super_gasp(cover, &dc, &r, ctx.deadline),
                _ => last_gasp(cover, &dc, &r),
            };
            ctx.trace("gasp", &cover);
            if cover.cost() >= before_gasp {
                break;
            }
        }
    }

    cover.extend_from(&essentials);
    cover.contain();
    if config.final_irredundant {
        cover = irredundant(cover, &d);
    }
    cover.sort_canonical();
    ctx.trace("final", &cover);

    verify_coverage(&original, &cover)?;
    ctx.stats.final_cost = cover.cost();
    if config.summary {
        eprintln!(
            "# espresso: {} -> {} cubes, {} iterations",
            ctx.stats.initial_cost.0, ctx.stats.final_cost.0, ctx.stats.iterations
        );
    }
    Ok(Solution {
        cover,
        status,
        stats: ctx.stats,
    })
}

/// Exactly minimize the cover triple (F, D, R)
///
/// The result has the minimum possible number of cubes; a single REDUCE /
/// EXPAND pass afterwards heuristically trims literals without touching the
/// cube count. Fails with [`MinimizeError::LimitExceeded`] when the prime
/// set or covering table outgrows `config.table_limit`.
pub fn minimize_exact(
    f: CubeSet,
    d: CubeSet,
    r: CubeSet,
    config: &EspressoConfig,
) -> Result<Solution, MinimizeError> {
    let (f, d, r) = prepare(f, d, r, config)?;
    let mut ctx = Context::new(config);
    ctx.stats.initial_cost = f.cost();
    let original = f.clone();

    let (mut cover, complete) = exact_cover(&f, &d, config.table_limit, ctx.deadline)?;
    ctx.trace("exact", &cover);

    // Literal polish; the cube count is already optimal and only shrinks.
    cover = reduce(cover, &d, false);
    cover = expand(cover, &r, false);
    if config.final_irredundant {
        cover = irredundant(cover, &d);
    }
    cover.sort_canonical();
    ctx.trace("final", &cover);

    verify_coverage(&original, &cover)?;
    ctx.stats.final_cost = cover.cost();
    Ok(Solution {
        cover,
        status: if complete {
            MinimizeStatus::Complete
        } else {
            MinimizeStatus::SoftTimeout
        },
        stats: ctx.stats,
    })
}

/// One EXPAND + IRREDUNDANT pass, nothing else
pub fn simplify(f: CubeSet, d: CubeSet, r: CubeSet) -> Result<CubeSet, MinimizeError> {
    let config = EspressoConfig::default();
    let (f, d, r) = prepare(f, d, r, &config)?;
    let original = f.clone();
    let mut cover = expand(f, &r, false);
    cover = irredundant(cover, &d);
    cover.sort_canonical();
    verify_coverage(&original, &cover)?;
    Ok(cover)
}

/// Verify that (F, D, R) partitions the space
///
/// Reports the first offending region: an overlap of F and R, or a point
/// none of the three sets covers.
pub fn check(f: &CubeSet, d: &CubeSet, r: &CubeSet) -> Result<CheckOutcome, MinimizeError> {
    validate(f, d, r)?;
    let overlap = f.intersect(r);
    if let Some(witness) = overlap.cubes().first() {
        return Ok(CheckOutcome::OffsetConflict(witness.clone()));
    }
    let mut all = f.clone();
    all.extend_from(d);
    all.extend_from(r);
    if !all.tautology() {
        let gap = all.complement();
        let witness = gap
            .cubes()
            .first()
            .expect("non-tautology has a non-empty complement")
            .clone();
        return Ok(CheckOutcome::CoverageGap(witness));
    }
    Ok(CheckOutcome::Ok)
}

/// Input validation plus the option-driven input rewrites
fn prepare(
    mut f: CubeSet,
    mut d: CubeSet,
    mut r: CubeSet,
    config: &EspressoConfig,
) -> Result<(CubeSet, CubeSet, CubeSet), MinimizeError> {
    validate(&f, &d, &r)?;
    if config.swap_on_off {
        std::mem::swap(&mut f, &mut r);
    }
    if config.recompute_onset {
        let mut dr = d.clone();
        dr.extend_from(&r);
        f = dr.complement();
    }
    // F and R must not overlap; D overlapping either is tolerated (the
    // classic reader produces such covers) and resolved in favour of F.
    let layout = Arc::clone(f.layout());
    for fc in f.iter() {
        for rc in r.iter() {
            if let Some(overlap) = fc.intersect(rc, &layout) {
                return Err(MinimizeError::OffsetConflict { witness: overlap });
            }
        }
    }
    if config.unwrap_onset && layout.num_outputs() > 1 {
        f = unwrap_onset(f);
    }
    Ok((f, d, r))
}

fn validate(f: &CubeSet, d: &CubeSet, r: &CubeSet) -> Result<(), MinimizeError> {
    let layout = f.layout();
    for (name, set) in [("ON", f), ("DC", d), ("OFF", r)] {
        if set.layout().as_ref() != layout.as_ref() {
            return Err(MinimizeError::InvalidInput {
                detail: format!("{}-set uses a different variable layout", name),
            });
        }
        for c in set.iter() {
            if c.has_empty_field(layout) {
                return Err(MinimizeError::InvalidInput {
                    detail: format!("{}-set cube with an empty variable field: {:?}", name, c),
                });
            }
        }
    }
    Ok(())
}

/// Split every multi-output cube into one cube per asserted output
fn unwrap_onset(f: CubeSet) -> CubeSet {
    let layout = Arc::clone(f.layout());
    let out_var = layout.output_var();
    let first = layout.var_first(out_var);
    let mut cubes = Vec::new();
    for c in f.iter() {
        let asserted: Vec<usize> = (0..layout.num_outputs())
            .filter(|&k| c.get(first + k))
            .collect();
        if asserted.len() <= 1 {
            cubes.push(c.clone());
        } else {
            for k in asserted {
                let mut single = c.clone();
                single.fix_var(out_var, k, &layout);
                cubes.push(single);
            }
        }
    }
    let mut out = CubeSet::with_cubes(layout, cubes);
    out.contain();
    out
}

/// Post-condition: the result covers every original ON-set cube on its own
fn verify_coverage(original: &CubeSet, result: &CubeSet) -> Result<(), MinimizeError> {
    for c in original.iter() {
        if !result.covers_cube(c) {
            return Err(MinimizeError::CoverageGap { witness: c.clone() });
        }
    }
    Ok(())
}
