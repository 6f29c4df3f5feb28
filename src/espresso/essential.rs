//! Essential prime extraction
//!
//! A prime is essential when it covers a point nothing else in the cover or
//! don't-care set reaches. Against a prime irredundant cover the classic
//! consensus test decides this without enumerating points: collect the
//! consensus of the cube with every other cube (intersection at distance 0,
//! the one-variable consensus at distance 1), and the cube is essential
//! exactly when that collection fails to cover it.
//!
//! The driver runs this right after the first EXPAND / IRREDUNDANT pass,
//! which is what makes the consensus test sound — it relies on the cubes
//! being prime.

use std::sync::Arc;

use super::cover::CubeSet;
use super::cube::Cube;

/// Split `f` into its essential cubes and the rest
///
/// Essentials cannot be reduced or expanded any further; the driver parks
/// them in the don't-care set while the loop works on the remainder and
/// reunites them at the end.
pub fn split_essential(f: CubeSet, d: &CubeSet) -> (CubeSet, CubeSet) {
    let layout = Arc::clone(f.layout());
    let cubes = f.into_cubes();

    let mut essential = Vec::new();
    let mut rest = Vec::new();
    for (i, c) in cubes.iter().enumerate() {
        let mut shadow: Vec<Cube> = Vec::new();
        for (j, q) in cubes.iter().enumerate() {
            if j != i {
                push_consensus(&mut shadow, q, c, &layout);
            }
        }
        for q in d.iter() {
            push_consensus(&mut shadow, q, c, &layout);
        }
        let shadow = CubeSet::with_cubes(Arc::clone(&layout), shadow);
        if shadow.covers_cube(c) {
            rest.push(c.clone());
        } else {
            essential.push(c.clone());
        }
    }

    (
        CubeSet::with_cubes(Arc::clone(&layout), essential),
        CubeSet::with_cubes(layout, rest),
    )
}

fn push_consensus(
    shadow: &mut Vec<Cube>,
    q: &Cube,
    c: &Cube,
    layout: &super::cube::CubeLayout,
) {
    if let Some(cons) = q.consensus(c, layout) {
        if !cons.has_empty_field(layout) {
            shadow.push(cons);
        }
    }
}
