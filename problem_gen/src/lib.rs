//! # Problem Generation
//!
//! This crate produces column-decomposed arithmetic problems: operand pairs
//! valid for an operation and difficulty tier, decomposed into ordered
//! place-value columns with canonical answer, carry, and remainder digits.
//!
//! ## Philosophy
//!
//! - **Infallible**: generation never surfaces an error; bounded retries fall
//!   back to a deterministic safe pair
//! - **Deterministic under seed**: every function is generic over
//!   [`rand::Rng`]; a seeded rng reproduces a quiz exactly
//! - **Computed once**: columns carry the full canonical derivation so that
//!   grading and gating never re-derive arithmetic
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Multi-digit multipliers or divisors (the vertical form is single-digit)
//! - Arbitrary precision (operands top out at four digits)
//! - An answer checker (that lives in the grading crate)

mod columns;
mod digits;
mod factory;
mod operands;

pub use columns::decompose;
pub use factory::{
    generate_problem, generate_problem_for_year, generate_problem_with, generate_quiz,
};
pub use operands::{generate_operands, requires_borrowing};
