//! Bridging boolean expressions in and out of covers
//!
//! `add_expr` flattens an expression to DNF and appends its products as
//! ON-set rows for one named output, growing the cover's dimensions and
//! labels as new variables appear. `to_expr` reads one output column back as
//! a sum-of-products expression.

use std::sync::Arc;

use super::cubes::{Cube, CubeType};
use super::error::ToExprError;
use super::minimisation::cover_to_dnf;
use super::{Cover, Dnf};
use crate::expression::BoolExpr;

impl Cover {
    /// Append an expression as ON-set rows of the named output
    ///
    /// Variables are matched to existing input labels by name; unknown
    /// variables (and an unknown output name) extend the cover.
    ///
    /// # Examples
    ///
    /// ```
    /// use ristretto_logic::{BoolExpr, Cover, CoverType};
    ///
    /// let expr = BoolExpr::parse("a * b + !a * !b").unwrap();
    /// let mut cover = Cover::new(CoverType::F);
    /// cover.add_expr(&expr, "eq");
    /// assert_eq!(cover.num_inputs(), 2);
    /// assert_eq!(cover.num_cubes(), 2);
    /// ```
    pub fn add_expr(&mut self, expr: &BoolExpr, output: &str) {
        let dnf = Dnf::from(expr);
        let out_pos = self.ensure_output(output);

        let positions: Vec<usize> = dnf
            .variables()
            .iter()
            .map(|v| self.ensure_input(v))
            .collect();

        for product in dnf.cubes() {
            let mut inputs = vec![None; self.num_inputs];
            for (var, &pos) in dnf.variables().iter().zip(positions.iter()) {
                if let Some(&polarity) = product.get(var) {
                    inputs[pos] = Some(polarity);
                }
            }
            let mut outputs = vec![false; self.num_outputs];
            outputs[out_pos] = true;
            self.push_row(Cube::new(&inputs, &outputs, CubeType::F));
        }
    }

    /// Read one output column back as a sum-of-products expression
    ///
    /// # Errors
    ///
    /// [`ToExprError::UnknownOutput`] when no output has the given name.
    pub fn to_expr(&self, output: &str) -> Result<BoolExpr, ToExprError> {
        let Some(out_pos) = self.output_position(output) else {
            return Err(ToExprError::UnknownOutput {
                label: output.to_string(),
            });
        };
        let column: Vec<Cube> = self
            .rows()
            .iter()
            .filter(|row| row.cube_type() == CubeType::F && row.outputs()[out_pos])
            .cloned()
            .collect();
        let view = Cover::from_parts(
            self.num_inputs,
            self.num_outputs,
            self.input_labels().to_vec(),
            self.output_labels().to_vec(),
            column,
            self.cover_type(),
        );
        Ok(BoolExpr::from(&cover_to_dnf(&view)))
    }

    fn ensure_input(&mut self, name: &Arc<str>) -> usize {
        if let Some(pos) = self.input_position(name) {
            return pos;
        }
        // Name all existing inputs, append the new name, then grow; the
        // label slot is taken before grow_to_fit backfills, keeping
        // positions and labels aligned.
        self.input_labels.fill_to(self.num_inputs);
        let pos = self.num_inputs;
        self.input_labels.push(Some(Arc::clone(name)));
        self.grow_to_fit(pos + 1, self.num_outputs);
        pos
    }

    fn ensure_output(&mut self, name: &str) -> usize {
        if let Some(pos) = self.output_position(name) {
            return pos;
        }
        self.output_labels.fill_to(self.num_outputs);
        let pos = self.num_outputs;
        self.output_labels.push(Some(Arc::from(name)));
        self.grow_to_fit(self.num_inputs, pos + 1);
        pos
    }
}
