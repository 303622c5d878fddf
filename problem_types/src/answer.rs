//! Per-problem answer state and the focus cursor

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::ProblemId;

/// Kind of cell a learner can write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellField {
    /// Answer-row digit (quotient digit for division)
    Answer,
    /// Carry written above a column (add/multiply, and subtract's reduced digit)
    Carry,
    /// The small borrow mark next to a subtracted digit
    Borrow,
    /// Remainder written next to a dividend digit
    Remainder,
}

impl fmt::Display for CellField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer => write!(f, "answer"),
            Self::Carry => write!(f, "carry"),
            Self::Borrow => write!(f, "borrow"),
            Self::Remainder => write!(f, "remainder"),
        }
    }
}

/// The transient focus cursor: which cell, of which problem, takes input
///
/// At most one exists per session; the session holds `None` after a problem
/// is locked for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCell {
    pub problem_id: ProblemId,
    pub column: usize,
    pub field: CellField,
}

impl ActiveCell {
    pub fn new(problem_id: ProblemId, column: usize, field: CellField) -> Self {
        Self {
            problem_id,
            column,
            field,
        }
    }
}

/// Mutable per-problem answer state, exclusively owned by the session
///
/// Four independent sparse digit maps keyed by column index, plus the set of
/// slashed (crossed-out) columns. A missing key means "not yet visited";
/// there is no empty-value sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswerState {
    pub answer_digits: BTreeMap<usize, char>,
    pub carry_digits: BTreeMap<usize, char>,
    pub borrow_digits: BTreeMap<usize, char>,
    pub remainder_digits: BTreeMap<usize, char>,
    pub slashed_cols: BTreeSet<usize>,
}

impl UserAnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, field: CellField) -> &BTreeMap<usize, char> {
        match field {
            CellField::Answer => &self.answer_digits,
            CellField::Carry => &self.carry_digits,
            CellField::Borrow => &self.borrow_digits,
            CellField::Remainder => &self.remainder_digits,
        }
    }

    fn map_mut(&mut self, field: CellField) -> &mut BTreeMap<usize, char> {
        match field {
            CellField::Answer => &mut self.answer_digits,
            CellField::Carry => &mut self.carry_digits,
            CellField::Borrow => &mut self.borrow_digits,
            CellField::Remainder => &mut self.remainder_digits,
        }
    }

    /// Recorded digit at (field, column), if any
    pub fn digit(&self, field: CellField, column: usize) -> Option<char> {
        self.map(field).get(&column).copied()
    }

    /// True when a digit has been recorded at (field, column)
    pub fn is_filled(&self, field: CellField, column: usize) -> bool {
        self.map(field).contains_key(&column)
    }

    /// Records a digit at (field, column), replacing any previous entry
    pub fn set_digit(&mut self, field: CellField, column: usize, digit: char) {
        self.map_mut(field).insert(column, digit);
    }

    /// Removes the entry at (field, column); the cell becomes unvisited again
    pub fn clear_digit(&mut self, field: CellField, column: usize) {
        self.map_mut(field).remove(&column);
    }

    pub fn is_slashed(&self, column: usize) -> bool {
        self.slashed_cols.contains(&column)
    }

    /// Flips the slash mark on a column, returning the new state
    pub fn toggle_slash(&mut self, column: usize) -> bool {
        if self.slashed_cols.remove(&column) {
            false
        } else {
            self.slashed_cols.insert(column);
            true
        }
    }

    /// Marks a column slashed regardless of its current state
    pub fn set_slashed(&mut self, column: usize) {
        self.slashed_cols.insert(column);
    }

    /// Discards every recorded digit and slash mark
    pub fn clear(&mut self) {
        self.answer_digits.clear();
        self.carry_digits.clear();
        self.borrow_digits.clear();
        self.remainder_digits.clear();
        self.slashed_cols.clear();
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.answer_digits.is_empty()
            && self.carry_digits.is_empty()
            && self.borrow_digits.is_empty()
            && self.remainder_digits.is_empty()
            && self.slashed_cols.is_empty()
    }
}
