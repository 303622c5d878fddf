//! Grading results

use serde::{Deserialize, Serialize};

/// Per-column verdict
///
/// `carry_correct` applies to add/multiply, `remainder_correct` to divide.
/// `None` means not applicable, or indeterminate for multiply's overflow
/// column with a blank carry. Indeterminate never fails the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResult {
    pub answer_correct: bool,
    pub carry_correct: Option<bool>,
    pub remainder_correct: Option<bool>,
}

/// Whole-problem grading verdict
///
/// Derived, recomputed fully on demand, never cached. Grading is binary:
/// `score` is 1 when every required subcomponent matches and 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_correct: bool,
    pub score: u8,
    pub column_results: Vec<ColumnResult>,
}

impl ValidationResult {
    pub fn new(is_correct: bool, column_results: Vec<ColumnResult>) -> Self {
        Self {
            is_correct,
            score: if is_correct { 1 } else { 0 },
            column_results,
        }
    }
}
