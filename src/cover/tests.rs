//! Unit tests for the high-level cover API

use super::*;
use crate::Minimizable;

#[test]
fn new_cover_is_empty() {
    let cover = Cover::new(CoverType::F);
    assert_eq!(cover.num_inputs(), 0);
    assert_eq!(cover.num_outputs(), 0);
    assert_eq!(cover.num_cubes(), 0);
}

#[test]
fn dimensions_grow_with_cubes() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    assert_eq!(cover.num_inputs(), 2);
    assert_eq!(cover.num_outputs(), 1);

    cover.add_cube(&[Some(true), Some(false), Some(true)], &[Some(true)]);
    assert_eq!(cover.num_inputs(), 3);
    // The earlier cube was padded with a don't-care.
    let first = cover.rows()[0].inputs();
    assert_eq!(first, &[Some(false), Some(true), None]);
}

#[test]
fn with_labels_fixes_dimensions() {
    let cover = Cover::with_labels(CoverType::F, &["a", "b", "c"], &["out"]);
    assert_eq!(cover.num_inputs(), 3);
    assert_eq!(cover.num_outputs(), 1);
    assert_eq!(cover.input_labels()[2].as_ref(), "c");
}

#[test]
fn output_values_route_to_sets() {
    let mut cover = Cover::new(CoverType::FDR);
    cover.add_cube(&[Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(false)], &[Some(false)]);
    cover.add_cube(&[None], &[None]);
    let kinds: Vec<CubeType> = cover.rows().iter().map(|r| r.cube_type()).collect();
    assert_eq!(kinds, vec![CubeType::F, CubeType::D, CubeType::R]);
}

#[test]
fn f_type_ignores_off_and_dc_outputs() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(true)], &[Some(false)]);
    cover.add_cube(&[Some(true)], &[None]);
    assert_eq!(cover.rows().len(), 0);
}

#[test]
fn minimize_merges_adjacent_cubes() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(false)], &[Some(true)]);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    let minimized = cover.minimize().unwrap();
    assert_eq!(minimized.num_cubes(), 1);
    let row = &minimized.rows()[0];
    assert_eq!(row.inputs(), &[Some(false), None]);
}

#[test]
fn minimize_xor_is_stable() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(false), Some(true)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
    let minimized = cover.minimize().unwrap();
    assert_eq!(minimized.num_cubes(), 2);
}

#[test]
fn minimize_uses_dont_cares() {
    let mut cover = Cover::new(CoverType::FD);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(true)], &[None]);
    let minimized = cover.minimize().unwrap();
    assert_eq!(minimized.num_cubes(), 1);
    // 10 absorbed the DC at 11 into the cube 1-.
    let f_row = minimized
        .rows()
        .iter()
        .find(|r| r.cube_type() == CubeType::F)
        .unwrap();
    assert_eq!(f_row.inputs(), &[Some(true), None]);
    // The original DC row rides along.
    assert!(minimized
        .rows()
        .iter()
        .any(|r| r.cube_type() == CubeType::D));
}

#[test]
fn minimize_keeps_labels() {
    let mut cover = Cover::with_labels(CoverType::F, &["a", "b"], &["f"]);
    cover.add_cube(&[Some(true), None], &[Some(true)]);
    let minimized = cover.minimize().unwrap();
    assert_eq!(minimized.input_labels()[0].as_ref(), "a");
    assert_eq!(minimized.output_labels()[0].as_ref(), "f");
}

#[test]
fn minimize_exact_on_cyclic_cover() {
    // Σm(0,1,2,5,6,7) over 3 inputs: the optimum is 3 cubes.
    let mut cover = Cover::new(CoverType::F);
    for m in [0b000u8, 0b001, 0b010, 0b101, 0b110, 0b111] {
        let inputs: Vec<Option<bool>> =
            (0..3).rev().map(|b| Some(m >> b & 1 == 1)).collect();
        cover.add_cube(&inputs, &[Some(true)]);
    }
    let exact = cover.minimize_exact().unwrap();
    assert_eq!(exact.num_cubes(), 3);
    let heuristic = cover.minimize().unwrap();
    assert!(heuristic.num_cubes() <= 4);
}

#[test]
fn empty_cover_minimizes_to_itself() {
    let cover = Cover::new(CoverType::F);
    let minimized = cover.minimize().unwrap();
    assert_eq!(minimized.num_cubes(), 0);
}

#[test]
fn simplify_drops_contained_cubes() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(true), None], &[Some(true)]);
    cover.add_cube(&[Some(true), Some(true)], &[Some(true)]);
    let out = cover.simplify().unwrap();
    assert_eq!(out.num_cubes(), 1);
}

#[test]
fn check_accepts_derived_sets() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_cube(&[Some(true), Some(false)], &[Some(true)]);
    assert_eq!(
        cover.check().unwrap(),
        crate::espresso::CheckOutcome::Ok
    );
}

#[test]
fn expr_round_trip() {
    let expr = crate::BoolExpr::parse("a * b + ~a * ~b").unwrap();
    let mut cover = Cover::new(CoverType::F);
    cover.add_expr(&expr, "eq");
    assert_eq!(cover.num_inputs(), 2);
    assert_eq!(cover.num_cubes(), 2);

    let back = cover.to_expr("eq").unwrap();
    assert!(back.equivalent_to(&expr));

    assert!(matches!(
        cover.to_expr("nope"),
        Err(ToExprError::UnknownOutput { .. })
    ));
}

#[test]
fn add_expr_reuses_existing_inputs() {
    let mut cover = Cover::new(CoverType::F);
    cover.add_expr(&crate::BoolExpr::parse("a * b").unwrap(), "f");
    cover.add_expr(&crate::BoolExpr::parse("b * c").unwrap(), "g");
    // b is shared; only c is new.
    assert_eq!(cover.num_inputs(), 3);
    assert_eq!(cover.num_outputs(), 2);
}

#[test]
fn minimized_expression_cover_round_trip() {
    let expr = crate::BoolExpr::parse("a * b + a * b * c + a * ~b").unwrap();
    let mut cover = Cover::new(CoverType::F);
    cover.add_expr(&expr, "out");
    let minimized = cover.minimize().unwrap();
    let back = minimized.to_expr("out").unwrap();
    assert!(back.equivalent_to(&expr));
    assert_eq!(minimized.num_cubes(), 1); // collapses to just `a`
}
