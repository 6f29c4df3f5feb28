//! Covers (ordered cube families) and the recursive cover operations
//!
//! A [`CubeSet`] is an ordered sequence of cubes over a shared layout. The
//! operations here — cofactor, tautology, complement, containment filtering,
//! cover-level sharp — are the substrate every minimization phase builds on.
//!
//! Tautology and complement recurse over a Shannon expansion. The splitting
//! variable is the most binate one: among variables with at least two parts
//! each missing from some cube, the one active in the most cubes wins (ties
//! break toward more active parts, then the lowest index). A cover unate in
//! every active variable is a tautology exactly when it carries the universal
//! cube, which terminates the recursion.

use std::sync::Arc;

use super::cube::{Cube, CubeLayout};

/// An ordered set of cubes sharing one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeSet {
    layout: Arc<CubeLayout>,
    cubes: Vec<Cube>,
}

impl CubeSet {
    /// New empty cover
    pub fn new(layout: Arc<CubeLayout>) -> Self {
        CubeSet {
            layout,
            cubes: Vec::new(),
        }
    }

    /// Cover holding the given cubes
    pub fn with_cubes(layout: Arc<CubeLayout>, cubes: Vec<Cube>) -> Self {
        CubeSet { layout, cubes }
    }

    /// Cover of the whole space (one universal cube)
    pub fn universe(layout: Arc<CubeLayout>) -> Self {
        let full = Cube::full(&layout);
        CubeSet {
            layout,
            cubes: vec![full],
        }
    }

    /// The shared layout
    pub fn layout(&self) -> &Arc<CubeLayout> {
        &self.layout
    }

    /// Number of cubes
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// True iff the cover holds no cubes
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// The cubes in cover order
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Iterate over the cubes
    pub fn iter(&self) -> std::slice::Iter<'_, Cube> {
        self.cubes.iter()
    }

    /// Append a cube
    pub fn push(&mut self, cube: Cube) {
        debug_assert!(!cube.has_empty_field(&self.layout));
        self.cubes.push(cube);
    }

    /// Append every cube of `other` (deep copies)
    pub fn extend_from(&mut self, other: &CubeSet) {
        debug_assert!(Arc::ptr_eq(&self.layout, &other.layout) || self.layout == other.layout);
        self.cubes.extend(other.cubes.iter().cloned());
    }

    /// Take the cubes out, consuming the cover
    pub fn into_cubes(self) -> Vec<Cube> {
        self.cubes
    }

    /// Replace the cube list
    pub fn set_cubes(&mut self, cubes: Vec<Cube>) {
        self.cubes = cubes;
    }

    /// Total literal count, saturating
    pub fn literal_count(&self) -> u64 {
        self.cubes
            .iter()
            .fold(0u64, |n, c| n.saturating_add(c.literal_count(&self.layout)))
    }

    /// Cost pair (cube count, literal count) compared lexicographically
    pub fn cost(&self) -> (u64, u64) {
        (self.cubes.len() as u64, self.literal_count())
    }

    /// Sort into canonical order (larger cubes first, then bit order)
    pub fn sort_canonical(&mut self) {
        self.cubes.sort_by(|a, b| a.cmp_canonical(b));
    }

    /// Canonicalize: sort and drop every cube contained in another
    ///
    /// Containment implies the container sorts no later than the containee,
    /// so one forward pass against the kept prefix suffices. Duplicates keep
    /// their first occurrence.
    pub fn contain(&mut self) {
        let layout = Arc::clone(&self.layout);
        contain_vec(&mut self.cubes, &layout);
    }

    /// Cofactor with respect to `c`
    ///
    /// Cubes disjoint from `c` are dropped; in the rest, every field is
    /// widened by the parts `c` excludes, so variables fixed by `c` become
    /// full. Algebraically each result cube is `d ∪ ¬c`.
    pub fn cofactor(&self, c: &Cube) -> CubeSet {
        let not_c = c.complement_bits(&self.layout);
        let cubes = self
            .cubes
            .iter()
            .filter(|d| d.distance(c, &self.layout) == 0)
            .map(|d| d.supercube(&not_c))
            .collect();
        CubeSet {
            layout: Arc::clone(&self.layout),
            cubes,
        }
    }

    /// True iff the cover contains every point of the space
    pub fn tautology(&self) -> bool {
        taut_rec(&self.cubes, &self.layout, 0)
    }

    /// True iff `c` is entirely inside the cover
    pub fn covers_cube(&self, c: &Cube) -> bool {
        self.cofactor(c).tautology()
    }

    /// Cover of the complement of this cover
    pub fn complement(&self) -> CubeSet {
        let mut cubes = compl_rec(self.cubes.clone(), &self.layout);
        let mut out = CubeSet {
            layout: Arc::clone(&self.layout),
            cubes: std::mem::take(&mut cubes),
        };
        out.contain();
        out
    }

    /// Cube-wise intersection of two covers
    ///
    /// When both covers are unate every variable has a dominant part, so
    /// pairs either miss on a shared inactive part or intersect cleanly; the
    /// distance pre-check then skips the field-emptiness scan for most
    /// pairs. The general path is the same pairwise AND with empty results
    /// dropped, followed by a containment filter.
    pub fn intersect(&self, other: &CubeSet) -> CubeSet {
        let mut cubes = Vec::new();
        for a in &self.cubes {
            for b in &other.cubes {
                if a.distance(b, &self.layout) > 0 {
                    continue;
                }
                cubes.push(a.and(b));
            }
        }
        let mut out = CubeSet {
            layout: Arc::clone(&self.layout),
            cubes,
        };
        out.contain();
        out
    }

    /// Disjoint fragments of `a` not covered by this cover
    ///
    /// Folds the disjoint sharp of `a` through every cube; the result cubes
    /// partition `a \ self`.
    pub fn sharp_from(&self, a: &Cube) -> Vec<Cube> {
        let mut pieces = vec![a.clone()];
        for b in &self.cubes {
            if pieces.is_empty() {
                break;
            }
            let mut next = Vec::with_capacity(pieces.len());
            for p in pieces {
                if p.distance(b, &self.layout) > 0 {
                    next.push(p);
                } else {
                    next.extend(p.dsharp(b, &self.layout));
                }
            }
            pieces = next;
        }
        pieces
    }
}

/// Per-variable activity summary of a cube list
pub(crate) struct Activity {
    /// Cubes in which the variable's field is not full.
    pub active_cubes: Vec<usize>,
    /// Parts of the variable missing from at least one cube.
    pub active_parts: Vec<usize>,
}

impl Activity {
    pub fn of(cubes: &[Cube], layout: &CubeLayout) -> Activity {
        let nv = layout.num_vars();
        let mut active_cubes = vec![0usize; nv];
        let mut part_missing = vec![false; layout.size()];
        for c in cubes {
            for var in 0..nv {
                if !c.field_is_full(var, layout) {
                    active_cubes[var] += 1;
                    let first = layout.var_first(var);
                    for p in 0..layout.var_parts(var) {
                        if !c.get(first + p) {
                            part_missing[first + p] = true;
                        }
                    }
                }
            }
        }
        let active_parts = (0..nv)
            .map(|var| {
                let first = layout.var_first(var);
                (0..layout.var_parts(var))
                    .filter(|&p| part_missing[first + p])
                    .count()
            })
            .collect();
        Activity {
            active_cubes,
            active_parts,
        }
    }

    /// A variable is binate when two or more of its parts are each missing
    /// from some cube.
    pub fn is_binate(&self, var: usize) -> bool {
        self.active_parts[var] >= 2
    }

    /// Most-binate splitting variable, or the most active unate one when the
    /// cover is unate throughout; `None` when no variable is active.
    pub fn split_var(&self) -> Option<usize> {
        let nv = self.active_cubes.len();
        let best = |vars: &mut dyn Iterator<Item = usize>| -> Option<usize> {
            vars.max_by(|&a, &b| {
                (self.active_cubes[a], self.active_parts[a], std::cmp::Reverse(a)).cmp(&(
                    self.active_cubes[b],
                    self.active_parts[b],
                    std::cmp::Reverse(b),
                ))
            })
        };
        let binate = best(&mut (0..nv).filter(|&v| self.is_binate(v)));
        binate.or_else(|| best(&mut (0..nv).filter(|&v| self.active_cubes[v] > 0)))
    }
}

/// Recursive tautology check
fn taut_rec(cubes: &[Cube], layout: &CubeLayout, depth: usize) -> bool {
    debug_assert!(depth <= layout.num_vars());
    if cubes.iter().any(|c| c.is_full(layout)) {
        return true;
    }
    if cubes.is_empty() {
        return false;
    }
    let act = Activity::of(cubes, layout);
    let var = match act.split_var() {
        Some(v) => v,
        // No active variable means every cube is full, handled above.
        None => return true,
    };
    if !act.is_binate(var) {
        // Unate in every active variable and no universal cube present.
        return false;
    }
    for part in 0..layout.var_parts(var) {
        let mut branch = Cube::full(layout);
        branch.fix_var(var, part, layout);
        let sub = cofactor_cubes(cubes, &branch, layout);
        if !taut_rec(&sub, layout, depth + 1) {
            return false;
        }
    }
    true
}

fn cofactor_cubes(cubes: &[Cube], c: &Cube, layout: &CubeLayout) -> Vec<Cube> {
    let not_c = c.complement_bits(layout);
    cubes
        .iter()
        .filter(|d| d.distance(c, layout) == 0)
        .map(|d| d.supercube(&not_c))
        .collect()
}

/// Recursive complement
fn compl_rec(cubes: Vec<Cube>, layout: &CubeLayout) -> Vec<Cube> {
    if cubes.is_empty() {
        return vec![Cube::full(layout)];
    }
    if cubes.iter().any(|c| c.is_full(layout)) {
        return Vec::new();
    }
    if cubes.len() == 1 {
        return compl_cube(&cubes[0], layout);
    }

    let act = Activity::of(&cubes, layout);
    let var = match act.split_var() {
        Some(v) => v,
        None => return Vec::new(),
    };

    // Branch cubes partition the space along the splitting variable. A
    // binate variable splits one branch per part; a unate one only needs the
    // single active part against the rest.
    let branches: Vec<Cube> = if act.is_binate(var) || layout.var_parts(var) <= 2 {
        (0..layout.var_parts(var))
            .map(|part| {
                let mut b = Cube::full(layout);
                b.fix_var(var, part, layout);
                b
            })
            .collect()
    } else {
        let first = layout.var_first(var);
        let missing = (0..layout.var_parts(var))
            .find(|&p| cubes.iter().any(|c| !c.get(first + p)))
            .expect("active variable without a missing part");
        let mut lo = Cube::full(layout);
        lo.fix_var(var, missing, layout);
        let mut hi = Cube::full(layout);
        hi.clear(first + missing);
        vec![lo, hi]
    };

    let mut result = Vec::new();
    for branch in branches {
        let sub = cofactor_cubes(&cubes, &branch, layout);
        for r in compl_rec(sub, layout) {
            // The recursion keeps the split variable full; restricting to the
            // branch cube can never empty a field.
            result.push(r.and(&branch));
        }
    }
    contain_vec(&mut result, layout);
    merge_var(&mut result, var, layout);
    result
}

/// Complement of a single cube: one result cube per non-full field
fn compl_cube(c: &Cube, layout: &CubeLayout) -> Vec<Cube> {
    let mut out = Vec::new();
    let not_c = c.complement_bits(layout);
    for var in 0..layout.num_vars() {
        if !c.field_is_full(var, layout) {
            let mut r = Cube::full(layout);
            let first = layout.var_first(var);
            for p in 0..layout.var_parts(var) {
                if !not_c.get(first + p) {
                    r.clear(first + p);
                }
            }
            out.push(r);
        }
    }
    out
}

/// Sort + containment filter on a raw cube list
pub(crate) fn contain_vec(cubes: &mut Vec<Cube>, _layout: &CubeLayout) {
    cubes.sort_by(|a, b| a.cmp_canonical(b));
    let mut kept: Vec<Cube> = Vec::with_capacity(cubes.len());
    'outer: for cube in cubes.drain(..) {
        for k in &kept {
            if k.contains(&cube) {
                continue 'outer;
            }
        }
        kept.push(cube);
    }
    *cubes = kept;
}

/// Merge cubes identical outside `var` by unioning their `var` fields
///
/// Run after a Shannon merge to undo the fragmentation the branch step
/// introduced on the splitting variable.
fn merge_var(cubes: &mut Vec<Cube>, var: usize, layout: &CubeLayout) {
    if cubes.len() < 2 {
        return;
    }
    let first = layout.var_first(var);
    let parts = layout.var_parts(var);
    let key = |c: &Cube| -> Vec<u32> {
        let mut masked = c.clone();
        for p in 0..parts {
            masked.clear(first + p);
        }
        masked.raw_words().to_vec()
    };
    let mut tagged: Vec<(Vec<u32>, Cube)> = cubes.drain(..).map(|c| (key(&c), c)).collect();
    tagged.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp_canonical(&b.1)));
    let mut out: Vec<Cube> = Vec::with_capacity(tagged.len());
    let mut run: Option<(Vec<u32>, Cube)> = None;
    for (k, c) in tagged {
        match &mut run {
            Some((rk, rc)) if *rk == k => {
                *rc = rc.supercube(&c);
            }
            _ => {
                if let Some((_, rc)) = run.take() {
                    out.push(rc);
                }
                run = Some((k, c));
            }
        }
    }
    if let Some((_, rc)) = run {
        out.push(rc);
    }
    out.sort_by(|a, b| a.cmp_canonical(b));
    *cubes = out;
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
        let cubes = rows
            .iter()
            .map(|(i, o)| pla_cube(layout, i, o))
            .collect();
        CubeSet::with_cubes(Arc::clone(layout), cubes)
    }

    #[test]
    fn tautology_of_all_minterms() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(
            &layout,
            &[("00", "1"), ("01", "1"), ("10", "1"), ("11", "1")],
        );
        assert!(f.tautology());
        let g = set(&layout, &[("00", "1"), ("01", "1"), ("10", "1")]);
        assert!(!g.tautology());
    }

    #[test]
    fn tautology_needs_full_output_field() {
        let layout = CubeLayout::binary(1, 2);
        // Covers all input space but only output 0.
        let f = set(&layout, &[("-", "10")]);
        assert!(!f.tautology());
        let g = set(&layout, &[("-", "11")]);
        assert!(g.tautology());
    }

    #[test]
    fn unate_cover_is_not_tautology() {
        let layout = CubeLayout::binary(3, 1);
        // x1 + x2 + x3: unate, no universal cube.
        let f = set(&layout, &[("1--", "1"), ("-1-", "1"), ("--1", "1")]);
        assert!(!f.tautology());
        // Adding the complemented corner completes the space.
        let mut g = f.clone();
        g.push(pla_cube(&layout, "000", "1"));
        assert!(g.tautology());
    }

    #[test]
    fn complement_is_disjoint_and_completes() {
        let layout = CubeLayout::binary(3, 1);
        let f = set(&layout, &[("1-1", "1"), ("01-", "1")]);
        let fc = f.complement();
        // F and its complement never intersect...
        for a in f.iter() {
            for b in fc.iter() {
                assert!(a.intersect(b, &layout).is_none());
            }
        }
        // ...and together cover everything.
        let mut both = f.clone();
        both.extend_from(&fc);
        assert!(both.tautology());
    }

    #[test]
    fn complement_of_empty_and_universe() {
        let layout = CubeLayout::binary(2, 1);
        let empty = CubeSet::new(Arc::clone(&layout));
        let u = empty.complement();
        assert_eq!(u.len(), 1);
        assert!(u.cubes()[0].is_full(&layout));

        let universe = CubeSet::universe(Arc::clone(&layout));
        assert!(universe.complement().is_empty());
    }

    #[test]
    fn complement_matches_tautology() {
        // Tautology ⇔ empty complement, on a handful of shapes.
        let layout = CubeLayout::binary(2, 1);
        let cases: Vec<Vec<(&str, &str)>> = vec![
            vec![("1-", "1"), ("-1", "1"), ("00", "1")],
            vec![("1-", "1"), ("-1", "1")],
            vec![("0-", "1"), ("1-", "1")],
            vec![("01", "1"), ("10", "1")],
        ];
        for rows in cases {
            let f = set(&layout, &rows);
            assert_eq!(f.tautology(), f.complement().is_empty(), "rows {rows:?}");
        }
    }

    #[test]
    fn cofactor_widens_fixed_variables() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("10", "1"), ("01", "1")]);
        let mut c = Cube::full(&layout);
        c.fix_var(0, 1, &layout); // x0 = 1
        let cf = f.cofactor(&c);
        assert_eq!(cf.len(), 1);
        assert!(cf.cubes()[0].field_is_full(0, &layout));
    }

    #[test]
    fn contain_removes_covered_cubes() {
        let layout = CubeLayout::binary(2, 1);
        let mut f = set(&layout, &[("11", "1"), ("1-", "1"), ("11", "1")]);
        f.contain();
        assert_eq!(f.len(), 1);
        assert_eq!(f.cubes()[0], pla_cube(&layout, "1-", "1"));
    }

    #[test]
    fn covers_cube_detects_coverage() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("1-", "1"), ("-1", "1")]);
        assert!(f.covers_cube(&pla_cube(&layout, "11", "1")));
        assert!(f.covers_cube(&pla_cube(&layout, "1-", "1")));
        assert!(!f.covers_cube(&pla_cube(&layout, "--", "1")));
        assert!(!f.covers_cube(&pla_cube(&layout, "00", "1")));
    }

    #[test]
    fn sharp_from_partitions_difference() {
        let layout = CubeLayout::binary(2, 1);
        let f = set(&layout, &[("11", "1")]);
        let frags = f.sharp_from(&pla_cube(&layout, "--", "1"));
        // Fragments are pairwise disjoint and avoid F.
        for (i, p) in frags.iter().enumerate() {
            assert!(p.intersect(&pla_cube(&layout, "11", "1"), &layout).is_none());
            for q in &frags[i + 1..] {
                assert!(p.intersect(q, &layout).is_none());
            }
        }
        // Together with F they cover the asserted-output space.
        let mut total = f.clone();
        for p in frags {
            total.push(p);
        }
        assert!(total.covers_cube(&pla_cube(&layout, "--", "1")));
    }

    #[test]
    fn cover_intersection() {
        let layout = CubeLayout::binary(2, 1);
        let a = set(&layout, &[("1-", "1")]);
        let b = set(&layout, &[("-1", "1"), ("0-", "1")]);
        let meet = a.intersect(&b);
        assert_eq!(meet.len(), 1);
        assert_eq!(meet.cubes()[0], pla_cube(&layout, "11", "1"));

        let disjoint = set(&layout, &[("0-", "1")]);
        assert!(a.intersect(&disjoint).is_empty());
    }

    #[test]
    fn cost_orders_lexicographically() {
        let layout = CubeLayout::binary(2, 1);
        let small = set(&layout, &[("1-", "1")]);
        let large = set(&layout, &[("10", "1"), ("11", "1")]);
        assert!(small.cost() < large.cost());
    }
}
