//! Expression formatting with minimal parentheses
//!
//! Output uses `+`, `*` and `~`. Parentheses appear only where precedence
//! demands: `a * ~b + ~a * b`, `(a + b) * c`.

use std::fmt;

use super::{BoolExpr, ExprNode};

/// Binding strength, weakest first.
#[derive(PartialEq, PartialOrd)]
enum Level {
    Or,
    And,
    Not,
}

fn write_expr(expr: &BoolExpr, parent: Level, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let level = match expr.node() {
        ExprNode::Or(..) => Level::Or,
        ExprNode::And(..) => Level::And,
        _ => Level::Not,
    };
    let parens = level < parent;
    if parens {
        write!(f, "(")?;
    }
    match expr.node() {
        ExprNode::Variable(name) => write!(f, "{}", name)?,
        ExprNode::Constant(value) => write!(f, "{}", if *value { "1" } else { "0" })?,
        ExprNode::Or(l, r) => {
            write_expr(l, Level::Or, f)?;
            write!(f, " + ")?;
            write_expr(r, Level::Or, f)?;
        }
        ExprNode::And(l, r) => {
            write_expr(l, Level::And, f)?;
            write!(f, " * ")?;
            write_expr(r, Level::And, f)?;
        }
        ExprNode::Not(inner) => {
            write!(f, "~")?;
            write_expr(inner, Level::Not, f)?;
        }
    }
    if parens {
        write!(f, ")")?;
    }
    Ok(())
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self, Level::Or, f)
    }
}

impl fmt::Debug for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoolExpr({})", self)
    }
}
