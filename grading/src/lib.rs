//! # Grading
//!
//! Pure answer validation: compares a learner's recorded per-column
//! derivation against the canonical columns of a problem.
//!
//! ## Philosophy
//!
//! - **Pure**: no state, no caching; the verdict is recomputed in full on
//!   every call and identical inputs always produce identical results
//! - **Whole-problem binary**: score is 1 or 0, no partial credit
//! - **Never fails**: absent entries are treated as blank, which is either
//!   wrong or accepted depending on whether the canonical value is zero
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A navigation gate (borrow digits and slash marks are checked by the
//!   session's completeness rules, not graded here)
//! - A partial-credit scorer

use problem_types::{
    CellField, ColumnResult, MathColumn, MathProblem, Operation, UserAnswerState,
    ValidationResult,
};

fn digit_char(d: u8) -> char {
    char::from(b'0' + d)
}

/// True for blank-or-zero, the accepted forms when the canonical value is 0
fn blank_or_zero(entry: Option<char>) -> bool {
    matches!(entry, None | Some('0'))
}

/// Grades a problem against its recorded answer state
///
/// Per column: the answer digit must match the canonical answer-row digit;
/// carries are checked for add/multiply and remainders for divide. Division's
/// highest column is exempt when its quotient digit is 0 (leading-zero
/// suppression): blank and `'0'` answers are accepted and its remainder is
/// never held against the learner. Multiply's overflow column tolerates a
/// blank carry as indeterminate rather than wrong.
pub fn validate(problem: &MathProblem, answers: &UserAnswerState) -> ValidationResult {
    let operation = problem.operation();
    let last_index = problem.column_count().saturating_sub(1);

    let mut all_correct = true;
    let mut column_results = Vec::with_capacity(problem.column_count());

    for (index, column) in problem.columns().iter().enumerate() {
        let leading_zero_column = operation == Operation::Divide
            && column.correct_sum_digit == 0
            && index == last_index;

        let answer_correct = check_answer(column, answers, index, leading_zero_column);
        let carry_correct = check_carry(operation, column, answers, index);
        let remainder_correct =
            check_remainder(operation, column, answers, index, leading_zero_column);

        if !answer_correct {
            all_correct = false;
        }
        if operation.uses_carries() && carry_correct == Some(false) {
            all_correct = false;
        }
        if operation == Operation::Divide && remainder_correct == Some(false) {
            all_correct = false;
        }

        column_results.push(ColumnResult {
            answer_correct,
            carry_correct,
            remainder_correct,
        });
    }

    ValidationResult::new(all_correct, column_results)
}

fn check_answer(
    column: &MathColumn,
    answers: &UserAnswerState,
    index: usize,
    leading_zero_column: bool,
) -> bool {
    let entry = answers.digit(CellField::Answer, index);
    if leading_zero_column && blank_or_zero(entry) {
        return true;
    }
    entry == Some(digit_char(column.correct_sum_digit))
}

fn check_carry(
    operation: Operation,
    column: &MathColumn,
    answers: &UserAnswerState,
    index: usize,
) -> Option<bool> {
    if !operation.uses_carries() {
        return None;
    }
    let entry = answers.digit(CellField::Carry, index);
    if column.correct_carry_in > 0 {
        match entry {
            // The overflow column's carry is implied by its answer; a blank
            // is indeterminate, not wrong.
            None if operation == Operation::Multiply && column.is_overflow() => None,
            None => Some(false),
            Some(c) => Some(c == digit_char(column.correct_carry_in)),
        }
    } else {
        Some(blank_or_zero(entry))
    }
}

fn check_remainder(
    operation: Operation,
    column: &MathColumn,
    answers: &UserAnswerState,
    index: usize,
    leading_zero_column: bool,
) -> Option<bool> {
    if operation != Operation::Divide {
        return None;
    }
    if leading_zero_column {
        return Some(true);
    }
    let entry = answers.digit(CellField::Remainder, index);
    if column.correct_carry_out > 0 {
        Some(entry == Some(digit_char(column.correct_carry_out)))
    } else {
        Some(blank_or_zero(entry))
    }
}
