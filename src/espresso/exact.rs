//! Exact minimization: all primes, a covering table, and its cyclic core
//!
//! Prime implicants are produced by iterated consensus: repeatedly add every
//! per-variable consensus of a cube pair that no existing cube absorbs, then
//! drop absorbed cubes, until nothing changes. The survivors are exactly the
//! primes of F ∪ D. The covering table pits non-essential primes (rows)
//! against witness fragments of the ON-set (columns); dominance reductions
//! and essential-row selection shrink it, and the branch-and-bound in
//! [`super::matrix`] settles the cyclic core.
//!
//! Table construction is bounded by the configured ceiling; overflowing it
//! reports `LimitExceeded` so the caller can fall back to the heuristic.

use std::sync::Arc;
use std::time::Instant;

use super::cover::{contain_vec, CubeSet};
use super::cube::{Cube, CubeLayout};
use super::error::MinimizeError;
use super::essential::split_essential;
use super::matrix::CoverMatrix;

/// Exact minimum cover of `f` using the don't-cares `d`
///
/// Returns the selected prime cover and a completeness flag (false when the
/// deadline interrupted the branch-and-bound; the cover is then valid but
/// possibly not minimum).
pub fn exact_cover(
    f: &CubeSet,
    d: &CubeSet,
    table_limit: usize,
    deadline: Option<Instant>,
) -> Result<(CubeSet, bool), MinimizeError> {
    let layout = Arc::clone(f.layout());
    if f.is_empty() {
        return Ok((CubeSet::new(layout), true));
    }

    let mut fd = f.clone();
    fd.extend_from(d);
    let primes = generate_primes(fd, table_limit)?;

    // Essential primes are forced; the table only argues about the rest.
    let (essential, free) = split_essential(primes, d);

    let mut shadow = essential.clone();
    shadow.extend_from(d);

    let free_cubes = free.cubes();
    let mut num_cols = 0usize;
    let mut entries: Vec<(usize, usize)> = Vec::new();
    for on_cube in f.iter() {
        let fragments = homogeneous_fragments(on_cube, &shadow, free_cubes, &layout, table_limit)?;
        for w in fragments {
            let col = num_cols;
            num_cols += 1;
            if num_cols > table_limit {
                return Err(MinimizeError::LimitExceeded { limit: table_limit });
            }
            let mut any = false;
            for (row, p) in free_cubes.iter().enumerate() {
                if p.contains(&w) {
                    entries.push((row, col));
                    any = true;
                }
            }
            debug_assert!(any, "ON-set fragment outside every prime");
        }
    }

    let mut table = CoverMatrix::new(free_cubes.len(), num_cols);
    for (r, c) in entries {
        table.insert(r, c);
    }
    let solution = table.solve(deadline);

    let mut cover = essential;
    for row in solution.rows {
        cover.push(free_cubes[row].clone());
    }
    cover.contain();
    Ok((cover, solution.complete))
}

/// All prime implicants of `fd` by iterated consensus
pub fn generate_primes(fd: CubeSet, limit: usize) -> Result<CubeSet, MinimizeError> {
    let layout = Arc::clone(fd.layout());
    let mut cubes = fd.into_cubes();
    contain_vec(&mut cubes, &layout);

    loop {
        let mut fresh: Vec<Cube> = Vec::new();
        for i in 0..cubes.len() {
            for j in i + 1..cubes.len() {
                let (a, b) = (&cubes[i], &cubes[j]);
                if a.distance(b, &layout) > 1 {
                    continue;
                }
                for var in 0..layout.num_vars() {
                    let Some(t) = a.consensus_on(b, var, &layout) else {
                        continue;
                    };
                    if t.has_empty_field(&layout) {
                        continue;
                    }
                    if cubes.iter().chain(fresh.iter()).any(|c| c.contains(&t)) {
                        continue;
                    }
                    fresh.push(t);
                    if cubes.len() + fresh.len() > limit {
                        return Err(MinimizeError::LimitExceeded { limit });
                    }
                }
            }
        }
        if fresh.is_empty() {
            break;
        }
        cubes.extend(fresh);
        contain_vec(&mut cubes, &layout);
    }
    Ok(CubeSet::with_cubes(layout, cubes))
}

/// Disjoint fragments of `on_cube` outside `shadow`, refined until each is
/// wholly inside or outside every prime in `rows`
fn homogeneous_fragments(
    on_cube: &Cube,
    shadow: &CubeSet,
    rows: &[Cube],
    layout: &Arc<CubeLayout>,
    limit: usize,
) -> Result<Vec<Cube>, MinimizeError> {
    let mut fragments = shadow.sharp_from(on_cube);
    for p in rows {
        let mut next = Vec::with_capacity(fragments.len());
        for w in fragments {
            if w.distance(p, layout) > 0 || p.contains(&w) {
                next.push(w);
            } else {
                let inside = w.and(p);
                next.extend(w.dsharp(p, layout));
                next.push(inside);
            }
        }
        fragments = next;
        if fragments.len() > limit {
            return Err(MinimizeError::LimitExceeded { limit });
        }
    }
    Ok(fragments)
}
