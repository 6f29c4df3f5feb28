//! Operator overloading: `*` = AND, `+` = OR, `!` = NOT
//!
//! Implemented for both owned values and references so expressions compose
//! without explicit clones on either side.

use std::ops::{Add, Mul, Not};

use super::BoolExpr;

impl Mul for BoolExpr {
    type Output = BoolExpr;
    fn mul(self, rhs: BoolExpr) -> BoolExpr {
        self.and(&rhs)
    }
}

impl Mul for &BoolExpr {
    type Output = BoolExpr;
    fn mul(self, rhs: &BoolExpr) -> BoolExpr {
        self.and(rhs)
    }
}

impl Mul<&BoolExpr> for BoolExpr {
    type Output = BoolExpr;
    fn mul(self, rhs: &BoolExpr) -> BoolExpr {
        self.and(rhs)
    }
}

impl Mul<BoolExpr> for &BoolExpr {
    type Output = BoolExpr;
    fn mul(self, rhs: BoolExpr) -> BoolExpr {
        self.and(&rhs)
    }
}

impl Add for BoolExpr {
    type Output = BoolExpr;
    fn add(self, rhs: BoolExpr) -> BoolExpr {
        self.or(&rhs)
    }
}

impl Add for &BoolExpr {
    type Output = BoolExpr;
    fn add(self, rhs: &BoolExpr) -> BoolExpr {
        self.or(rhs)
    }
}

impl Add<&BoolExpr> for BoolExpr {
    type Output = BoolExpr;
    fn add(self, rhs: &BoolExpr) -> BoolExpr {
        self.or(rhs)
    }
}

impl Add<BoolExpr> for &BoolExpr {
    type Output = BoolExpr;
    fn add(self, rhs: BoolExpr) -> BoolExpr {
        self.or(&rhs)
    }
}

impl Not for BoolExpr {
    type Output = BoolExpr;
    fn not(self) -> BoolExpr {
        BoolExpr::not(&self)
    }
}

impl Not for &BoolExpr {
    type Output = BoolExpr;
    fn not(self) -> BoolExpr {
        BoolExpr::not(self)
    }
}
