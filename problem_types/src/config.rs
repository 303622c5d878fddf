//! Typed quiz configuration

use serde::{Deserialize, Serialize};

use crate::{DifficultyTier, Operation};

/// Configuration for one practice session
///
/// `include_borrowing` only matters for subtraction: `Some(false)` asks the
/// generator for operand pairs that subtract without borrowing; `Some(true)`
/// or `None` allows borrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub difficulty: DifficultyTier,
    pub operation: Operation,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_borrowing: Option<bool>,
}

impl QuizConfig {
    pub fn new(difficulty: DifficultyTier, operation: Operation, count: usize) -> Self {
        Self {
            difficulty,
            operation,
            count,
            include_borrowing: None,
        }
    }

    /// Sets the borrowing flag (subtraction only)
    pub fn with_borrowing(mut self, include_borrowing: bool) -> Self {
        self.include_borrowing = Some(include_borrowing);
        self
    }
}
