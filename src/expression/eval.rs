//! Expression evaluation under a variable assignment

use std::collections::HashMap;

use super::{BoolExpr, ExprNode};

impl BoolExpr {
    /// Evaluate under the given assignment; unassigned variables read as
    /// `false`
    ///
    /// # Examples
    ///
    /// ```
    /// use ristretto_logic::BoolExpr;
    /// use std::collections::HashMap;
    ///
    /// let e = BoolExpr::parse("a * ~b").unwrap();
    /// let env = HashMap::from([("a", true), ("b", false)]);
    /// assert!(e.evaluate(&env));
    /// ```
    pub fn evaluate(&self, assignment: &HashMap<&str, bool>) -> bool {
        self.evaluate_with(&|name| assignment.get(name).copied().unwrap_or(false))
    }

    /// Evaluate with a lookup function
    pub fn evaluate_with(&self, lookup: &dyn Fn(&str) -> bool) -> bool {
        match self.node() {
            ExprNode::Variable(name) => lookup(name),
            ExprNode::And(l, r) => l.evaluate_with(lookup) && r.evaluate_with(lookup),
            ExprNode::Or(l, r) => l.evaluate_with(lookup) || r.evaluate_with(lookup),
            ExprNode::Not(e) => !e.evaluate_with(lookup),
            ExprNode::Constant(value) => *value,
        }
    }
}
