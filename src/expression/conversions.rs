//! Conversions between expressions and [`Dnf`]
//!
//! Flattening pushes negations to the leaves (De Morgan) while distributing
//! conjunctions over disjunctions; contradictory products vanish and
//! [`Dnf::from_cubes`] absorbs the redundant ones. The reverse direction
//! rebuilds a plain sum of products.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{BoolExpr, ExprNode};
use crate::cover::Dnf;

type Product = BTreeMap<Arc<str>, bool>;

fn flatten(expr: &BoolExpr, negate: bool) -> Vec<Product> {
    match expr.node() {
        ExprNode::Variable(name) => {
            let mut product = Product::new();
            product.insert(Arc::clone(name), !negate);
            vec![product]
        }
        ExprNode::Constant(value) => {
            if value ^ negate {
                vec![Product::new()] // TRUE: the empty product
            } else {
                Vec::new() // FALSE: no products
            }
        }
        ExprNode::Not(inner) => flatten(inner, !negate),
        ExprNode::And(l, r) if !negate => distribute(&flatten(l, false), &flatten(r, false)),
        ExprNode::Or(l, r) if negate => distribute(&flatten(l, true), &flatten(r, true)),
        ExprNode::And(l, r) => {
            let mut products = flatten(l, true);
            products.extend(flatten(r, true));
            products
        }
        ExprNode::Or(l, r) => {
            let mut products = flatten(l, false);
            products.extend(flatten(r, false));
            products
        }
    }
}

/// Cross product of two product lists; contradictory merges drop out
fn distribute(left: &[Product], right: &[Product]) -> Vec<Product> {
    let mut out = Vec::with_capacity(left.len() * right.len());
    'pairs: for a in left {
        for b in right {
            let mut merged = a.clone();
            for (var, &polarity) in b {
                match merged.get(var) {
                    Some(&existing) if existing != polarity => continue 'pairs,
                    _ => {
                        merged.insert(Arc::clone(var), polarity);
                    }
                }
            }
            out.push(merged);
        }
    }
    out
}

impl From<&BoolExpr> for Dnf {
    fn from(expr: &BoolExpr) -> Self {
        Dnf::from_cubes(flatten(expr, false))
    }
}

impl From<BoolExpr> for Dnf {
    fn from(expr: BoolExpr) -> Self {
        Dnf::from(&expr)
    }
}

impl From<&Dnf> for BoolExpr {
    fn from(dnf: &Dnf) -> Self {
        let mut terms = dnf.iter().map(|product| {
            let mut literals = product.iter().map(|(var, &polarity)| {
                let v = BoolExpr::wrap(ExprNode::Variable(Arc::clone(var)));
                if polarity {
                    v
                } else {
                    v.not()
                }
            });
            match literals.next() {
                Some(first) => literals.fold(first, |acc, lit| acc.and(&lit)),
                None => BoolExpr::constant(true),
            }
        });
        match terms.next() {
            Some(first) => terms.fold(first, |acc, term| acc.or(&term)),
            None => BoolExpr::constant(false),
        }
    }
}

impl From<Dnf> for BoolExpr {
    fn from(dnf: Dnf) -> Self {
        BoolExpr::from(&dnf)
    }
}
