//! EXPAND: grow every cube into a prime against the OFF-set
//!
//! Cubes are processed in ascending weight order (cubes built from rare
//! literals first). Each step raises one unset bit of the current cube,
//! keeping the cube disjoint from the OFF-set and preferring the raise that
//! covers the most other ON-set cubes outright, then the raise that keeps the
//! most of them feasibly coverable. Equal-merit raises resolve to the lowest
//! bit index, which keeps the output byte-for-byte reproducible.
//!
//! Raising is monotone — a raise that hits the OFF-set stays illegal in every
//! superset — so the greedy loop always terminates on a prime.

use std::sync::Arc;

use super::cover::CubeSet;
use super::cube::{Cube, CubeLayout};

/// Expand every cube of `f` against the OFF-set `r`
///
/// With `single_pass` the merit scan is skipped and every legal bit is raised
/// in ascending index order; this is the cheap variant behind the `fast`
/// strategy. The result is contain-sorted, so its cube count never exceeds
/// the input's.
pub fn expand(f: CubeSet, r: &CubeSet, single_pass: bool) -> CubeSet {
    let layout = Arc::clone(f.layout());
    let mut cubes = f.into_cubes();
    if cubes.is_empty() {
        return CubeSet::new(layout);
    }

    let order = processing_order(&cubes, &layout);
    let mut covered = vec![false; cubes.len()];

    for &i in &order {
        if covered[i] {
            continue;
        }
        let mut cube = cubes[i].clone();
        if single_pass {
            for bit in 0..layout.size() {
                if !cube.get(bit) && raise_is_legal(&cube, bit, r, &layout) {
                    cube.set(bit);
                }
            }
        } else {
            loop {
                let raise = best_raise(&cube, i, &cubes, &covered, r, &layout);
                match raise {
                    Some(bit) => cube.set(bit),
                    None => break,
                }
            }
        }
        for (j, other) in cubes.iter().enumerate() {
            if j != i && !covered[j] && cube.contains(other) {
                covered[j] = true;
            }
        }
        cubes[i] = cube;
    }

    let kept = cubes
        .into_iter()
        .zip(covered)
        .filter(|(_, dead)| !*dead)
        .map(|(c, _)| c)
        .collect();
    let mut out = CubeSet::with_cubes(layout, kept);
    out.contain();
    out
}

/// Ascending weight order: weight is the sum over set bits of that bit's
/// column count in `cubes`, so lonely cubes go first
fn processing_order(cubes: &[Cube], layout: &CubeLayout) -> Vec<usize> {
    let mut col = vec![0u64; layout.size()];
    for c in cubes {
        for (bit, count) in col.iter_mut().enumerate() {
            if c.get(bit) {
                *count += 1;
            }
        }
    }
    let weight = |c: &Cube| -> u64 {
        col.iter()
            .enumerate()
            .filter(|&(bit, _)| c.get(bit))
            .fold(0u64, |n, (_, &cnt)| n.saturating_add(cnt))
    };
    let mut order: Vec<usize> = (0..cubes.len()).collect();
    order.sort_by(|&a, &b| {
        weight(&cubes[a])
            .cmp(&weight(&cubes[b]))
            .then_with(|| cubes[a].cmp_canonical(&cubes[b]))
            .then_with(|| a.cmp(&b))
    });
    order
}

fn raise_is_legal(cube: &Cube, bit: usize, r: &CubeSet, layout: &CubeLayout) -> bool {
    let mut raised = cube.clone();
    raised.set(bit);
    r.iter().all(|rc| raised.distance(rc, layout) > 0)
}

/// The best legal raise for `cube`, or `None` when the cube is prime
pub(crate) fn best_raise(
    cube: &Cube,
    own: usize,
    cubes: &[Cube],
    covered: &[bool],
    r: &CubeSet,
    layout: &CubeLayout,
) -> Option<usize> {
    let mut best: Option<(u64, u64, usize)> = None;
    for bit in 0..layout.size() {
        if cube.get(bit) {
            continue;
        }
        let mut raised = cube.clone();
        raised.set(bit);
        if r.iter().any(|rc| raised.distance(rc, layout) == 0) {
            continue;
        }
        let mut contained = 0u64;
        let mut feasible = 0u64;
        for (j, other) in cubes.iter().enumerate() {
            if j == own || covered[j] {
                continue;
            }
            if raised.contains(other) {
                contained += 1;
            } else {
                let join = raised.supercube(other);
                if r.iter().all(|rc| join.distance(rc, layout) > 0) {
                    feasible += 1;
                }
            }
        }
        // Higher merit wins; the lowest bit breaks ties because candidates
        // are scanned in ascending order with a strict comparison.
        let candidate = (contained, feasible, bit);
        let better = match best {
            None => true,
            Some((bc, bf, _)) => (contained, feasible) > (bc, bf),
        };
        if better {
            best = Some(candidate);
        }
    }
    best.map(|(_, _, bit)| bit)
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

    #[test]
    fn merges_adjacent_cubes() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("00-", "1"), ("01-", "1")]);
        let r = set(&layout, &[("1--", "1")]);
        let out = expand(f, &r, false);
        assert_eq!(out.len(), 1);
        assert_eq!(out.cubes()[0], pla_cube(&layout, "0--", "1"));
    }

    #[test]
    fn xor_cubes_cannot_grow() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("01", "1"), ("10", "1")]);
        let r = set(&layout, &[("00", "1"), ("11", "1")]);
        let out = expand(f, &r, false);
        assert_eq!(out.len(), 2);
        let mut sorted = out.clone();
        sorted.sort_canonical();
        assert_eq!(sorted.cubes()[0], pla_cube(&layout, "01", "1"));
        assert_eq!(sorted.cubes()[1], pla_cube(&layout, "10", "1"));
    }

    #[test]
    fn empty_offset_expands_to_universe() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("01", "1"), ("10", "1")]);
        let r = CubeSet::new(Arc::clone(&layout));
        let out = expand(f, &r, false);
        assert_eq!(out.len(), 1);
        assert!(out.cubes()[0].is_full(&layout));
    }

    #[test]
    fn expanded_cubes_are_prime() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("000", "1"), ("011", "1")]);
        let r = set(&layout, &[("1--", "1"), ("010", "1")]);
        let out = expand(f, &r, false);
        for c in out.iter() {
            // No single raise stays disjoint from R.
            for bit in 0..layout.size() {
                if !c.get(bit) {
                    assert!(!raise_is_legal(c, bit, &r, &layout), "raise {bit} legal");
                }
            }
            // Still disjoint from R.
            for rc in r.iter() {
                assert!(c.distance(rc, &layout) > 0);
            }
        }
    }

    #[test]
    fn single_pass_also_reaches_primes() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("00-", "1"), ("01-", "1")]);
        let r = set(&layout, &[("1--", "1")]);
        let out = expand(f, &r, true);
        assert_eq!(out.len(), 1);
        assert_eq!(out.cubes()[0], pla_cube(&layout, "0--", "1"));
    }

    #[test]
    fn never_increases_cube_count() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("00", "1"), ("01", "1"), ("10", "1")]);
        let r = set(&layout, &[("11", "1")]);
        let before = f.len();
        let out = expand(f, &r, false);
        assert!(out.len() <= before);
    }
}
