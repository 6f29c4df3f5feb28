//! LAST_GASP and SUPER_GASP: escaping local minima
//!
//! When the main loop stalls, every cube is reduced as far as it will go —
//! all at once, against the cover as of loop entry, deliberately abandoning
//! coverage for a moment — and the reduced cubes are re-expanded against each
//! other. An expanded cube that swallows another reduced cube is evidence of
//! a merge the ordinary loop could not see; the candidates join the cover and
//! a full IRREDUNDANT pass decides what stays. The result is accepted only
//! when strictly cheaper, so the phase can never worsen the cover.
//!
//! SUPER_GASP simply iterates LAST_GASP until it stops paying.

use std::sync::Arc;
use std::time::Instant;

use super::cover::CubeSet;
use super::cube::Cube;
use super::expand::best_raise;
use super::irredundant::irredundant;
use super::reduce::smallest_uncovered_cube;

/// One reduce_gasp / expand_gasp / irredundant round
///
/// Returns the improved cover, or the input unchanged when the round did not
/// strictly lower the (cubes, literals) cost.
pub fn last_gasp(f: CubeSet, d: &CubeSet, r: &CubeSet) -> CubeSet {
    let layout = Arc::clone(f.layout());
    let cost0 = f.cost();
    if f.len() <= 1 {
        return f;
    }

    // reduce_gasp: maximal reduction of every cube against the loop-entry
    // cover, not the partially reduced one.
    let mut reduced: Vec<Cube> = Vec::with_capacity(f.len());
    for (i, c) in f.iter().enumerate() {
        let mut rest: Vec<Cube> = f
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, q)| q.clone())
            .collect();
        rest.extend(d.iter().cloned());
        let rest = CubeSet::with_cubes(Arc::clone(&layout), rest);
        if let Some(rc) = smallest_uncovered_cube(c, &rest, &layout) {
            reduced.push(rc);
        }
    }
    if reduced.len() <= 1 {
        return f;
    }

    // expand_gasp: regrow each reduced cube towards the others; keep the
    // ones that actually swallowed a sibling.
    let no_cover = vec![false; reduced.len()];
    let mut merged: Vec<Cube> = Vec::new();
    for (i, g) in reduced.iter().enumerate() {
        let mut cube = g.clone();
        while let Some(bit) = best_raise(&cube, i, &reduced, &no_cover, r, &layout) {
            cube.set(bit);
        }
        if reduced
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && cube.contains(other))
        {
            merged.push(cube);
        }
    }
    if merged.is_empty() {
        return f;
    }

    let mut candidate = f.clone();
    for c in merged {
        candidate.push(c);
    }
    candidate.contain();
    let candidate = irredundant(candidate, d);

    if candidate.cost() < cost0 {
        candidate
    } else {
        f
    }
}

/// Iterate [`last_gasp`] until no further improvement (or the deadline hits)
pub fn super_gasp(mut f: CubeSet, d: &CubeSet, r: &CubeSet, deadline: Option<Instant>) -> CubeSet {
    loop {
        if let Some(limit) = deadline {
            if Instant::now() >= limit {
                return f;
            }
        }
        let cost = f.cost();
        f = last_gasp(f, d, r);
        if f.cost() >= cost {
            return f;
        }
    }
}
