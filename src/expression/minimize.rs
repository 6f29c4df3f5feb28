//! [`Minimizable`] for boolean expressions
//!
//! Expressions minimize through the cover pipeline: flatten to DNF, lay the
//! products out as a single-output cover, run the core, read the result
//! back. A contradiction minimizes to `0`, a tautology to `1`.

use super::BoolExpr;
use crate::cover::{Dnf, Minimizable};
use crate::error::MinimizationError;
use crate::espresso::EspressoConfig;

impl Minimizable for BoolExpr {
    fn minimize_with_config(&self, config: &EspressoConfig) -> Result<Self, MinimizationError> {
        let dnf = Dnf::from(self);
        let minimized = crate::cover::minimize_dnf(&dnf, config, false)?;
        Ok(BoolExpr::from(&minimized))
    }

    fn minimize_exact_with_config(
        &self,
        config: &EspressoConfig,
    ) -> Result<Self, MinimizationError> {
        let dnf = Dnf::from(self);
        let minimized = crate::cover::minimize_dnf(&dnf, config, true)?;
        Ok(BoolExpr::from(&minimized))
    }
}
