//! REDUCE: shrink each cube to the smallest cube still needed
//!
//! Every cube is replaced by the smallest cube containing the points that
//! only it covers — the supercube of its region outside the remaining cover
//! and don't-cares. Coverage never changes and literal count never grows;
//! the point of shrinking is to give the next EXPAND room to grow cubes in a
//! different, possibly better direction.
//!
//! Cubes are processed sequentially, largest first by default; the reverse
//! ordering backs the driver's alternate-order variant. Both orders are
//! fully deterministic.

use std::sync::Arc;

use super::cover::CubeSet;
use super::cube::{Cube, CubeLayout};

/// Reduce every cube of `f` against the rest of `f` plus `d`
pub fn reduce(f: CubeSet, d: &CubeSet, reverse_order: bool) -> CubeSet {
    let layout = Arc::clone(f.layout());
    let mut cubes = f.into_cubes();
    if cubes.is_empty() {
        return CubeSet::new(layout);
    }

    let mut order: Vec<usize> = (0..cubes.len()).collect();
    order.sort_by(|&a, &b| {
        cubes[b]
            .popcount()
            .cmp(&cubes[a].popcount())
            .then_with(|| cubes[a].cmp_canonical(&cubes[b]))
            .then_with(|| a.cmp(&b))
    });
    if reverse_order {
        order.reverse();
    }

    let mut alive = vec![true; cubes.len()];
    for &i in &order {
        let c = cubes[i].clone();
        let mut rest: Vec<Cube> = cubes
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i && alive[j])
            .map(|(_, q)| q.clone())
            .collect();
        rest.extend(d.iter().cloned());
        let rest = CubeSet::with_cubes(Arc::clone(&layout), rest);
        match smallest_uncovered_cube(&c, &rest, &layout) {
            Some(reduced) => cubes[i] = reduced,
            None => alive[i] = false,
        }
    }

    let kept = cubes
        .into_iter()
        .zip(alive)
        .filter(|(_, a)| *a)
        .map(|(c, _)| c)
        .collect();
    CubeSet::with_cubes(layout, kept)
}

/// The maximally reduced replacement for one cube, computed against an
/// arbitrary remainder cover (also used by the gasp phase)
///
/// Returns `None` when the remainder covers the cube entirely.
pub(crate) fn smallest_uncovered_cube(
    c: &Cube,
    rest: &CubeSet,
    layout: &Arc<CubeLayout>,
) -> Option<Cube> {
    let cof = rest.cofactor(c);
    if cof.tautology() {
        return None;
    }
    // Inside c, the complement of the cofactor is exactly the region only c
    // covers; the supercube of its intersection with c is the reduced cube.
    let compl = cof.complement();
    let mut super_cube: Option<Cube> = None;
    for w in compl.iter() {
        if let Some(piece) = w.intersect(c, layout) {
            super_cube = Some(match super_cube {
                Some(s) => s.supercube(&piece),
                None => piece,
            });
        }
    }
    debug_assert!(super_cube.is_some(), "non-tautology cofactor left nothing");
    super_cube
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pla_cube(layout: &CubeLayout, inputs: &str, outputs: &str) -> Cube {
        let mut c = Cube::zero(layout);
        for (i, ch) in inputs.chars().enumerate() {
            let first = layout.var_first(i);
            match ch {
                '0' => c.set(first),
                '1' => c.set(first + 1),
                '-' => {
                    c.set(first);
                    c.set(first + 1);
                }
                _ => panic!("bad input char"),
            }
        }
        let out_first = layout.var_first(layout.output_var());
        for (i, ch) in outputs.chars().enumerate() {
            if ch == '1' {
                c.set(out_first + i);
            }
        }
        c
    }

    fn set(layout: &Arc<CubeLayout>, rows: &[(&str, &str)]) -> CubeSet {
        let cubes = rows.iter().map(|(i, o)| pla_cube(layout, i, o)).collect();
        CubeSet::with_cubes(Arc::clone(layout), cubes)
    }

    fn same_coverage(a: &CubeSet, b: &CubeSet) -> bool {
        a.iter().all(|c| b.covers_cube(c)) && b.iter().all(|c| a.covers_cube(c))
    }

    #[test]
    fn shrinks_overlapping_cube() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("0--", "1"), ("-1-", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = reduce(f.clone(), &d, false);
        assert!(same_coverage(&out, &f));
        // One of the two cubes lost its overlap and is strictly smaller now.
        let bits = |s: &CubeSet| s.iter().map(|c| c.popcount()).sum::<usize>();
        assert!(bits(&out) < bits(&f));
    }

    #[test]
    fn drops_fully_covered_cube() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("1-", "1"), ("11", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = reduce(f.clone(), &d, false);
        assert_eq!(out.len(), 1);
        assert!(same_coverage(&out, &f));
    }

    #[test]
    fn disjoint_cubes_are_untouched() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("01", "1"), ("10", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = reduce(f.clone(), &d, false);
        let mut sorted = out.clone();
        sorted.sort_canonical();
        let mut expect = f.clone();
        expect.sort_canonical();
        assert_eq!(sorted, expect);
    }

    #[test]
    fn dont_cares_enable_deeper_reduction() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("1-", "1")]);
        let d = set(&layout, &[("11", "1")]);
        let out = reduce(f, &d, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out.cubes()[0], pla_cube(&layout, "10", "1"));
    }

    #[test]
    fn never_grows_a_cube() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("0--", "1"), ("-1-", "1"), ("--1", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let bits = |s: &CubeSet| s.iter().map(|c| c.popcount()).sum::<usize>();
        let before = bits(&f);
        let out = reduce(f.clone(), &d, false);
        assert!(bits(&out) <= before);
        assert!(same_coverage(&out, &f));
    }

    #[test]
    fn reverse_order_still_preserves_coverage() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("0--", "1"), ("-1-", "1"), ("--1", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = reduce(f.clone(), &d, true);
        assert!(same_coverage(&out, &f));
    }
}
