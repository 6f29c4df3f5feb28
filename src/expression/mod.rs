//! Boolean expressions: parsing, composition, evaluation, minimization
//!
//! [`BoolExpr`] is a lightweight expression tree behind an `Arc`, built
//! programmatically (`and` / `or` / `not`, the overloaded `* + !` operators,
//! or the [`expr!`](crate::expr) macro) or parsed from a string. Expressions
//! flatten to [`Dnf`](crate::Dnf) on their way into a
//! [`Cover`](crate::Cover), which is how [`Minimizable`](crate::Minimizable)
//! works for them.
//!
//! # Examples
//!
//! ```
//! use ristretto_logic::{BoolExpr, Minimizable};
//!
//! # fn main() -> std::io::Result<()> {
//! let expr = BoolExpr::parse("a * b + a * b * c")?;
//! let minimized = expr.minimize()?;
//! assert_eq!(minimized.to_string(), "a * b");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

mod conversions;
mod display;
mod eval;
mod minimize;
mod operators;

use crate::error::ParseBoolExprError;

// Grammar processed by lalrpop at build time.
#[allow(clippy::all)]
mod parser {
    use lalrpop_util::lalrpop_mod;
    lalrpop_mod!(pub bool_expr, "/expression/bool_expr.rs");
}

/// Node of an expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprNode {
    /// A named variable
    Variable(Arc<str>),
    /// Conjunction
    And(BoolExpr, BoolExpr),
    /// Disjunction
    Or(BoolExpr, BoolExpr),
    /// Negation
    Not(BoolExpr),
    /// TRUE or FALSE
    Constant(bool),
}

/// A boolean expression
///
/// Cloning is cheap (`Arc` sharing). Operators: `+`/`|` for OR, `*`/`&` for
/// AND, `~`/`!` for NOT, parentheses for grouping, constants `0`, `1`,
/// `true`, `false`.
///
/// # Examples
///
/// ```
/// use ristretto_logic::BoolExpr;
///
/// let a = BoolExpr::variable("a");
/// let b = BoolExpr::variable("b");
/// let xor = a.and(&b.not()).or(&a.not().and(&b));
/// assert_eq!(xor.to_string(), "a * ~b + ~a * b");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BoolExpr {
    node: Arc<ExprNode>,
}

impl BoolExpr {
    pub(crate) fn wrap(node: ExprNode) -> Self {
        BoolExpr {
            node: Arc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &ExprNode {
        &self.node
    }

    /// A variable with the given name
    pub fn variable(name: &str) -> Self {
        Self::wrap(ExprNode::Variable(Arc::from(name)))
    }

    /// The constant TRUE or FALSE
    pub fn constant(value: bool) -> Self {
        Self::wrap(ExprNode::Constant(value))
    }

    /// Parse an expression from a string
    ///
    /// ```
    /// use ristretto_logic::BoolExpr;
    ///
    /// # fn main() -> std::io::Result<()> {
    /// let e = BoolExpr::parse("(a + b) * ~c")?;
    /// assert_eq!(e.collect_variables().len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseBoolExprError> {
        parser::bool_expr::ExprParser::new()
            .parse(input)
            .map_err(|e| ParseBoolExprError::new(input, e))
    }

    /// Conjunction with another expression
    pub fn and(&self, other: &BoolExpr) -> BoolExpr {
        Self::wrap(ExprNode::And(self.clone(), other.clone()))
    }

    /// Disjunction with another expression
    pub fn or(&self, other: &BoolExpr) -> BoolExpr {
        Self::wrap(ExprNode::Or(self.clone(), other.clone()))
    }

    /// Negation
    pub fn not(&self) -> BoolExpr {
        Self::wrap(ExprNode::Not(self.clone()))
    }

    /// All variable names, sorted
    pub fn collect_variables(&self) -> BTreeSet<Arc<str>> {
        let mut vars = BTreeSet::new();
        self.collect_into(&mut vars);
        vars
    }

    fn collect_into(&self, vars: &mut BTreeSet<Arc<str>>) {
        match self.node() {
            ExprNode::Variable(name) => {
                vars.insert(Arc::clone(name));
            }
            ExprNode::And(l, r) | ExprNode::Or(l, r) => {
                l.collect_into(vars);
                r.collect_into(vars);
            }
            ExprNode::Not(e) => e.collect_into(vars),
            ExprNode::Constant(_) => {}
        }
    }

    /// Logical equivalence, decided by exhaustive evaluation
    ///
    /// Exponential in the number of distinct variables; intended for the
    /// small expressions this API is about.
    pub fn equivalent_to(&self, other: &BoolExpr) -> bool {
        let mut vars = self.collect_variables();
        vars.extend(other.collect_variables());
        let vars: Vec<Arc<str>> = vars.into_iter().collect();
        let n = vars.len();
        debug_assert!(n < usize::BITS as usize);
        for assignment in 0u64..(1u64 << n) {
            let env = |name: &str| -> bool {
                vars.iter()
                    .position(|v| v.as_ref() == name)
                    .map(|i| assignment >> i & 1 == 1)
                    .unwrap_or(false)
            };
            if self.evaluate_with(&env) != other.evaluate_with(&env) {
                return false;
            }
        }
        true
    }
}
