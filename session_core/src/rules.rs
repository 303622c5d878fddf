//! Fill-order rules
//!
//! Pure functions over a problem and its answer state: prerequisite
//! redirects, ordering targets, readiness, blocked columns, auto-advance,
//! and completeness. The session applies these; nothing here mutates.

use std::collections::BTreeSet;

use problem_types::{CellField, MathProblem, Operation, UserAnswerState};

/// Verdict of the subtraction readiness check for a borrowing column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubtractReadiness {
    Ready,
    /// The next-higher digit has not been slashed yet
    NeedsSlash { neighbor: usize },
    /// A prerequisite cell must be filled first
    Redirect { column: usize, field: CellField },
}

/// Entry column for a problem: division starts at its start column,
/// everything else at the units
pub(crate) fn entry_column(problem: &MathProblem) -> usize {
    match problem.operation() {
        Operation::Divide => problem.division_start_column().unwrap_or(0),
        _ => 0,
    }
}

/// Prerequisite cell that must be filled before `column`'s answer
///
/// The "blinking field" rule: an answer click lands on a lower-priority cell
/// whose value the derivation needs first.
pub(crate) fn blink_redirect(
    problem: &MathProblem,
    answers: &UserAnswerState,
    column: usize,
) -> Option<(usize, CellField)> {
    let columns = problem.columns();
    match problem.operation() {
        Operation::Add | Operation::Multiply => {
            let prev = column.checked_sub(1)?;
            let prev_col = columns.get(prev)?;
            if prev_col.correct_carry_out > 0
                && answers.is_filled(CellField::Answer, prev)
                && !answers.is_filled(CellField::Carry, column)
            {
                return Some((column, CellField::Carry));
            }
            None
        }
        Operation::Subtract => {
            if answers.is_slashed(column) && !answers.is_filled(CellField::Carry, column) {
                return Some((column, CellField::Carry));
            }
            let next = column + 1;
            if answers.is_slashed(next)
                && answers.is_filled(CellField::Carry, next)
                && !answers.is_filled(CellField::Borrow, column)
            {
                return Some((column, CellField::Borrow));
            }
            None
        }
        Operation::Divide => {
            let col = columns.get(column)?;
            if answers.is_slashed(column)
                && col.correct_carry_out > 0
                && !answers.is_filled(CellField::Remainder, column)
            {
                return Some((column, CellField::Remainder));
            }
            None
        }
    }
}

/// Next unfilled answer column, filling low to high (add/subtract/multiply)
pub(crate) fn next_unfilled_low_to_high(
    problem: &MathProblem,
    answers: &UserAnswerState,
) -> Option<usize> {
    (0..problem.column_count()).find(|&i| !answers.is_filled(CellField::Answer, i))
}

/// Next unfilled quotient column, filling from the start column down
pub(crate) fn next_unfilled_division(
    problem: &MathProblem,
    answers: &UserAnswerState,
) -> Option<usize> {
    let start = problem.division_start_column()?;
    (0..=start)
        .rev()
        .find(|&i| !answers.is_filled(CellField::Answer, i))
}

/// Readiness of a borrowing column's answer cell
///
/// Slash, carry, and borrow live one step apart: the slash and reduced digit
/// (carry) sit on the next-higher column, the borrow mark on this one.
pub(crate) fn subtraction_readiness(
    problem: &MathProblem,
    answers: &UserAnswerState,
    column: usize,
) -> SubtractReadiness {
    let Some(col) = problem.column(column) else {
        return SubtractReadiness::Ready;
    };
    if !col.needs_borrow() {
        return SubtractReadiness::Ready;
    }

    let neighbor = column + 1;
    if neighbor >= problem.column_count() {
        return SubtractReadiness::Ready;
    }
    if !answers.is_slashed(neighbor) {
        return SubtractReadiness::NeedsSlash { neighbor };
    }
    if !answers.is_filled(CellField::Carry, neighbor) {
        return SubtractReadiness::Redirect {
            column: neighbor,
            field: CellField::Carry,
        };
    }
    if !answers.is_filled(CellField::Borrow, column) {
        return SubtractReadiness::Redirect {
            column,
            field: CellField::Borrow,
        };
    }
    SubtractReadiness::Ready
}

/// Where focus moves after a digit is recorded at (`column`, `field`)
///
/// `answers` is the state after the write. Returns `None` when focus stays.
pub(crate) fn auto_advance(
    problem: &MathProblem,
    answers: &UserAnswerState,
    column: usize,
    field: CellField,
) -> Option<(usize, CellField)> {
    let count = problem.column_count();
    match problem.operation() {
        Operation::Divide => match field {
            CellField::Answer => {
                let col = problem.column(column)?;
                if col.correct_carry_out == 0 {
                    column.checked_sub(1).map(|next| (next, CellField::Answer))
                } else {
                    Some((column, CellField::Remainder))
                }
            }
            CellField::Remainder => {
                column.checked_sub(1).map(|next| (next, CellField::Answer))
            }
            _ => None,
        },
        Operation::Subtract => match field {
            // The reduced digit is written one column above the borrow mark
            CellField::Carry => column.checked_sub(1).map(|next| (next, CellField::Borrow)),
            CellField::Borrow => Some((column, CellField::Answer)),
            CellField::Answer => {
                let next = column + 1;
                (next < count).then_some((next, CellField::Answer))
            }
            _ => None,
        },
        Operation::Add | Operation::Multiply => match field {
            CellField::Answer => {
                let next = column + 1;
                if next >= count {
                    return None;
                }
                let col = problem.column(column)?;
                if col.correct_carry_out > 0 {
                    Some((next, CellField::Carry))
                } else {
                    Some((next, CellField::Answer))
                }
            }
            CellField::Carry => {
                if !answers.is_filled(CellField::Answer, column) {
                    Some((column, CellField::Answer))
                } else {
                    let next = column + 1;
                    (next < count).then_some((next, CellField::Answer))
                }
            }
            _ => None,
        },
    }
}

/// Answer columns currently blocked behind an unfilled carry/borrow/remainder
///
/// Pure and recomputed on demand; the session exposes it for rendering.
pub fn blocked_answer_columns(
    problem: &MathProblem,
    answers: &UserAnswerState,
) -> BTreeSet<usize> {
    let mut blocked = BTreeSet::new();
    let columns = problem.columns();

    match problem.operation() {
        Operation::Add | Operation::Multiply => {
            for i in 1..columns.len() {
                let prev = &columns[i - 1];
                if prev.correct_carry_out > 0
                    && answers.is_filled(CellField::Answer, i - 1)
                    && !answers.is_filled(CellField::Carry, i)
                {
                    blocked.insert(i);
                }
            }
        }
        Operation::Subtract => {
            for i in 0..columns.len() {
                if answers.is_slashed(i) && !answers.is_filled(CellField::Carry, i) {
                    blocked.insert(i);
                }
                let next = i + 1;
                if answers.is_slashed(next)
                    && answers.is_filled(CellField::Carry, next)
                    && !answers.is_filled(CellField::Borrow, i)
                {
                    blocked.insert(i);
                }
            }
        }
        Operation::Divide => {
            // An unfilled nonzero remainder blocks the next column to be
            // consumed, which is one index lower in storage order.
            for i in 1..columns.len() {
                if answers.is_slashed(i)
                    && columns[i].correct_carry_out > 0
                    && !answers.is_filled(CellField::Remainder, i)
                {
                    blocked.insert(i - 1);
                }
            }
        }
    }

    blocked
}

/// True when every field the operation requires has been filled
pub fn is_problem_complete(problem: &MathProblem, answers: &UserAnswerState) -> bool {
    let columns = problem.columns();

    if problem.operation() == Operation::Divide {
        let Some(start) = problem.division_start_column() else {
            return true;
        };
        for i in (0..=start).rev() {
            if !answers.is_filled(CellField::Answer, i) {
                return false;
            }
            if !answers.is_slashed(i) {
                return false;
            }
            if columns[i].correct_carry_out > 0 && !answers.is_filled(CellField::Remainder, i) {
                return false;
            }
        }
        return true;
    }

    if (0..columns.len()).any(|i| !answers.is_filled(CellField::Answer, i)) {
        return false;
    }

    match problem.operation() {
        Operation::Add | Operation::Multiply => {
            for i in 0..columns.len() {
                if columns[i].correct_carry_out > 0
                    && i + 1 < columns.len()
                    && !answers.is_filled(CellField::Carry, i + 1)
                {
                    return false;
                }
            }
        }
        Operation::Subtract => {
            for (i, col) in columns.iter().enumerate() {
                if col.needs_borrow() {
                    let next = i + 1;
                    if !answers.is_slashed(next)
                        || !answers.is_filled(CellField::Carry, next)
                        || !answers.is_filled(CellField::Borrow, i)
                    {
                        return false;
                    }
                }
            }
        }
        _ => {}
    }

    true
}
