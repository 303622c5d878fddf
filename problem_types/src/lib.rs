//! # Problem Types
//!
//! This crate defines the data model for the MathGym tutoring core.
//!
//! ## Philosophy
//!
//! - **Typed, not stringly**: operations, fields, and cells are enums, not tags
//! - **Absent is not empty**: sparse per-column maps distinguish "never
//!   visited" from any recorded value
//! - **Immutable problems**: a [`MathProblem`] is built once and never mutated
//! - **Testable**: every type is serializable and can be round-tripped
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A rendering model (no layout, no styling)
//! - A persistence schema (the host owns storage formats)
//! - Arbitrary precision arithmetic (operands are small integers)

mod answer;
mod column;
mod config;
mod ids;
mod operation;
mod validation;

pub use answer::{ActiveCell, CellField, UserAnswerState};
pub use column::{MathColumn, MathProblem};
pub use config::QuizConfig;
pub use ids::ProblemId;
pub use operation::{DifficultyTier, Operation};
pub use validation::{ColumnResult, ValidationResult};
