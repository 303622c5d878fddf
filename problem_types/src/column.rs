//! Column-decomposed problems
//!
//! A problem is stored as an ordered sequence of place-value columns, index 0
//! the least-significant digit. Division is computed most-significant first
//! but stored in the same low-to-high order as every other operation.

use serde::{Deserialize, Serialize};

use crate::{Operation, ProblemId};

/// One place-value column of a vertical problem
///
/// `digit1` is the top operand's digit (`None` when that operand is shorter
/// than the column span, or for a carry/overflow column). `digit2` is the
/// bottom operand's digit; it is always `None` for multiply and divide, whose
/// second operand is a scalar on the problem.
///
/// For divide, `correct_sum_digit` is the quotient digit, `correct_carry_in`
/// the remainder entering the step, and `correct_carry_out` the remainder
/// leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathColumn {
    /// Top operand digit, if present
    pub digit1: Option<u8>,
    /// Bottom operand digit, if present
    pub digit2: Option<u8>,
    /// Canonical answer-row digit for this column
    pub correct_sum_digit: u8,
    /// Carry (add/multiply) or remainder (divide) entering this column
    pub correct_carry_in: u8,
    /// Carry or remainder leaving this column
    pub correct_carry_out: u8,
}

impl MathColumn {
    /// Top digit, treating a missing digit as zero
    pub fn top_or_zero(&self) -> u8 {
        self.digit1.unwrap_or(0)
    }

    /// Bottom digit, treating a missing digit as zero
    pub fn bottom_or_zero(&self) -> u8 {
        self.digit2.unwrap_or(0)
    }

    /// True when subtracting this column requires a borrow
    pub fn needs_borrow(&self) -> bool {
        self.top_or_zero() < self.bottom_or_zero()
    }

    /// True for a column with no top digit (carry/overflow column)
    pub fn is_overflow(&self) -> bool {
        self.digit1.is_none()
    }
}

/// An immutable column-decomposed arithmetic problem
///
/// Created once per quiz question, never mutated, discarded at session end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    id: ProblemId,
    index: usize,
    num1: u32,
    num2: u32,
    operation: Operation,
    columns: Vec<MathColumn>,
}

impl MathProblem {
    /// Assembles a problem from its parts
    ///
    /// Callers are expected to pass columns produced by the decomposer;
    /// nothing re-derives them afterwards.
    pub fn new(
        id: ProblemId,
        index: usize,
        num1: u32,
        num2: u32,
        operation: Operation,
        columns: Vec<MathColumn>,
    ) -> Self {
        Self {
            id,
            index,
            num1,
            num2,
            operation,
            columns,
        }
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    /// Position of this problem within its quiz
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num1(&self) -> u32 {
        self.num1
    }

    pub fn num2(&self) -> u32 {
        self.num2
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn columns(&self) -> &[MathColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&MathColumn> {
        self.columns.get(index)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Start column for short division: the highest index whose dividend
    /// digit is at least the divisor, else one lower
    ///
    /// Quotient entry begins here and proceeds strictly down to column 0.
    /// Returns `None` for non-division problems, and for the degenerate
    /// single-digit dividend smaller than its divisor (unreachable through
    /// the generator, which draws dividends of two digits or more).
    pub fn division_start_column(&self) -> Option<usize> {
        if self.operation != Operation::Divide || self.columns.is_empty() {
            return None;
        }
        let max_idx = self.columns.len() - 1;
        let first_digit = self.columns[max_idx].top_or_zero();
        if u32::from(first_digit) < self.num2 {
            max_idx.checked_sub(1)
        } else {
            Some(max_idx)
        }
    }
}
