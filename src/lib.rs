//! # Ristretto Logic
//!
//! A native Rust two-level logic minimizer in the Espresso tradition: given
//! a Boolean function as a sum of product terms — the ON-set, plus optional
//! don't-care and OFF-sets — produce an equivalent cover with (heuristically
//! or exactly) the fewest product terms, then the fewest literals.
//!
//! ## Three ways in
//!
//! ### Boolean expressions
//!
//! ```
//! use ristretto_logic::{expr, BoolExpr, Minimizable};
//!
//! # fn main() -> std::io::Result<()> {
//! let a = BoolExpr::variable("a");
//! let b = BoolExpr::variable("b");
//! let c = BoolExpr::variable("c");
//! let redundant = expr!(a * b + a * b * c);
//!
//! let minimized = redundant.minimize()?;
//! assert_eq!(minimized.to_string(), "a * b");
//! # Ok(())
//! # }
//! ```
//!
//! Or parse from a string:
//!
//! ```
//! use ristretto_logic::{BoolExpr, Minimizable};
//!
//! # fn main() -> std::io::Result<()> {
//! let expr = BoolExpr::parse("a * b + ~a * ~b")?;
//! let minimized = expr.minimize()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Covers (truth tables)
//!
//! ```
//! use ristretto_logic::{Cover, CoverType, Minimizable};
//!
//! let mut cover = Cover::new(CoverType::F);
//! cover.add_cube(&[Some(false), Some(true)], &[Some(true)]); // 01 -> 1
//! cover.add_cube(&[Some(true), Some(false)], &[Some(true)]); // 10 -> 1
//!
//! let minimized = cover.minimize().unwrap();
//! assert_eq!(minimized.num_cubes(), 2); // XOR is already minimal
//! ```
//!
//! ### PLA files
//!
//! ```
//! use ristretto_logic::{Cover, CoverType, Minimizable, PLAReader, PLAWriter};
//!
//! # fn main() -> std::io::Result<()> {
//! let pla = ".i 2\n.o 1\n.type fd\n10 1\n01 1\n11 -\n.e\n";
//! let cover = Cover::from_pla_string(pla)?;
//! let minimized = cover.minimize()?;
//! // Both minterms grow through the don't-care corner at 11.
//! assert_eq!(minimized.num_cubes(), 2);
//! let _text = minimized.to_pla_string(CoverType::F)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## The core
//!
//! The [`espresso`] module is the engine underneath: bit-packed multi-valued
//! cubes, the cover algebra (tautology, complement, cofactor, sharp), the
//! EXPAND / IRREDUNDANT / REDUCE iteration with essential-prime peeling and
//! the gasp escapes, and the exact branch-and-bound solver. It is a plain
//! library — single-threaded, deterministic, no I/O — and can be driven
//! directly when the high-level [`Cover`] API is too coarse:
//!
//! - [`espresso::minimize_heuristic`] / [`espresso::minimize_exact`]
//! - [`espresso::simplify`] — one EXPAND + IRREDUNDANT pass
//! - [`espresso::check`] — consistency check of an (F, D, R) triple
//!
//! Multi-valued input variables are first-class in the core
//! ([`espresso::CubeLayout::with_parts`]); the high-level API sticks to
//! binary inputs, matching the PLA format it speaks.

pub mod cover;
pub mod error;
pub mod espresso;
pub mod expression;
pub mod pla;

pub use cover::{Cover, CoverType, Cube, CubeData, CubeType, CubesIter, Dnf, Minimizable, ToExprError};
pub use error::{MinimizationError, ParseBoolExprError};
pub use espresso::{EspressoConfig, MinimizeError, MinimizeStatus, Strategy};
pub use expression::BoolExpr;
pub use pla::{PLAError, PLAReadError, PLAReader, PLAWriteError, PLAWriter};

// The expr! procedural macro.
pub use ristretto_logic_macros::expr;
