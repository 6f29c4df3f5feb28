//! IRREDUNDANT: drop every cube the rest of the cover already explains
//!
//! The cover splits into three classes against the don't-care set: relatively
//! essential cubes (covering a point nothing else covers — always kept),
//! totally redundant cubes (inside the essentials plus don't-cares — always
//! dropped), and the partially redundant rest. A minimum-cover problem over
//! the partially redundant cubes decides which of them survive.
//!
//! Columns of that problem are witness fragments: the disjoint sharp of each
//! partially redundant cube against the essentials and don't-cares, refined
//! until every fragment lies wholly inside or wholly outside each candidate
//! cube. Refinement is capped; an unrefined fragment keeps only the rows that
//! contain it outright, which can retain an extra cube but never uncovers
//! one.

use std::sync::Arc;

use super::cover::CubeSet;
use super::cube::{Cube, CubeLayout};
use super::matrix::CoverMatrix;

/// Refinement ceiling per partially redundant cube.
const FRAGMENT_LIMIT: usize = 4096;

/// Remove redundant cubes from `f` relative to the don't-care set `d`
pub fn irredundant(f: CubeSet, d: &CubeSet) -> CubeSet {
    let layout = Arc::clone(f.layout());
    let cubes = f.into_cubes();
    if cubes.len() <= 1 {
        let mut out = CubeSet::with_cubes(layout, cubes);
        out.contain();
        return out;
    }

    // Relatively essential: not covered by the rest of F plus D.
    let mut essential = Vec::new();
    let mut candidates = Vec::new();
    for (i, c) in cubes.iter().enumerate() {
        let mut rest: Vec<Cube> = cubes
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, q)| q.clone())
            .collect();
        rest.extend(d.iter().cloned());
        let rest = CubeSet::with_cubes(Arc::clone(&layout), rest);
        if rest.covers_cube(c) {
            candidates.push(c.clone());
        } else {
            essential.push(c.clone());
        }
    }

    let mut er_d = CubeSet::with_cubes(Arc::clone(&layout), essential.clone());
    er_d.extend_from(d);

    // Totally redundant cubes vanish; the rest go to the covering problem.
    let partially: Vec<Cube> = candidates
        .into_iter()
        .filter(|c| !er_d.covers_cube(c))
        .collect();

    let mut kept = essential;
    if !partially.is_empty() {
        let selected = solve_partial(&partially, &er_d, &layout);
        kept.extend(selected);
    }

    let mut out = CubeSet::with_cubes(layout, kept);
    out.contain();
    out
}

/// Minimum subset of `partially` that, with `er_d`, still covers every
/// partially redundant cube
fn solve_partial(partially: &[Cube], er_d: &CubeSet, layout: &Arc<CubeLayout>) -> Vec<Cube> {
    let mut matrix_cols = 0usize;
    let mut entries: Vec<(usize, usize)> = Vec::new();

    for r in partially.iter() {
        let fragments = witness_fragments(r, partially, er_d, layout);
        for w in fragments {
            let col = matrix_cols;
            matrix_cols += 1;
            for (j, q) in partially.iter().enumerate() {
                if q.contains(&w) {
                    entries.push((j, col));
                }
            }
        }
    }

    let mut m = CoverMatrix::new(partially.len(), matrix_cols);
    for (r, c) in entries {
        m.insert(r, c);
    }
    let solution = m.solve(None);
    solution
        .rows
        .into_iter()
        .map(|i| partially[i].clone())
        .collect()
}

/// Disjoint, homogeneous fragments of `r` not covered by `er_d`
///
/// Homogeneous: wholly inside or wholly outside every cube of `partially`,
/// so containment of a fragment carries the same information as containment
/// of a representative minterm.
fn witness_fragments(
    r: &Cube,
    partially: &[Cube],
    er_d: &CubeSet,
    layout: &Arc<CubeLayout>,
) -> Vec<Cube> {
    let mut fragments = er_d.sharp_from(r);
    for q in partially {
        if q == r {
            continue;
        }
        if fragments.len() > FRAGMENT_LIMIT {
            break;
        }
        let mut next = Vec::with_capacity(fragments.len());
        for w in fragments {
            if w.distance(q, layout) > 0 || q.contains(&w) {
                next.push(w);
            } else {
                let inside = w.and(q);
                next.extend(w.dsharp(q, layout));
                next.push(inside);
            }
        }
        fragments = next;
    }
    fragments
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

    fn covers_same(a: &CubeSet, b: &CubeSet) -> bool {
        a.iter().all(|c| b.covers_cube(c)) && b.iter().all(|c| a.covers_cube(c))
    }

    #[test]
    fn drops_totally_redundant_cube() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("0-", "1"), ("11", "1"), ("1-", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = irredundant(f.clone(), &d);
        assert_eq!(out.len(), 2);
        assert!(covers_same(&out, &f));
    }

    #[test]
    fn keeps_essential_cubes() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("01", "1"), ("10", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = irredundant(f.clone(), &d);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn resolves_partial_redundancy_minimally() {
        let layout = CubeLayout::binary(2, 1);
        // "0-" is essential (00); "11" and "-1" overlap on 11.
        let f = set(&layout, &[("0-", "1"), ("11", "1"), ("-1", "1")]);
        let d = CubeSet::new(Arc::clone(&layout));
        let out = irredundant(f.clone(), &d);
        assert_eq!(out.len(), 2);
        assert!(covers_same(&out, &f));
    }

    #[test]
    fn uses_dont_cares_for_redundancy() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("1-", "1"), ("-1", "1")]);
        // DC covers 11 and 01: "-1" adds nothing beyond D plus "1-".
        let d = set(&layout, &[("-1", "1")]);
        let out = irredundant(f, &d);
        assert_eq!(out.len(), 1);
        assert_eq!(out.cubes()[0], pla_cube(&layout, "1-", "1"));
    }

    #[test]
    fn no_cube_is_covered_by_the_others() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(
            &layout,
            &[
                ("0-0", "1"),
                ("00-", "1"),
                ("-01", "1"),
                ("1-1", "1"),
                ("11-", "1"),
            ],
        );
        let d = CubeSet::new(Arc::clone(&layout));
        let out = irredundant(f.clone(), &d);
        assert!(covers_same(&out, &f));
        // Post-condition: removing any cube opens a gap.
        for i in 0..out.len() {
            let rest: Vec<Cube> = out
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| c.clone())
                .collect();
            let rest = CubeSet::with_cubes(Arc::clone(&layout), rest);
            assert!(!rest.covers_cube(&out.cubes()[i]));
        }
    }

    #[test]
    fn idempotent() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(
            &layout,
            &[("0--", "1"), ("-1-", "1"), ("11-", "1"), ("--1", "1")],
        );
        let d = CubeSet::new(Arc::clone(&layout));
        let once = irredundant(f, &d);
        let twice = irredundant(once.clone(), &d);
        assert_eq!(once, twice);
    }
}
