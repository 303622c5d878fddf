//! Arithmetic operations and difficulty tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operation of a problem
///
/// Multiplication and division carry a scalar multiplier/divisor on the
/// problem itself; their columns have no bottom digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// True for operations whose derivation records carries (add, multiply)
    pub fn uses_carries(&self) -> bool {
        matches!(self, Self::Add | Self::Multiply)
    }

    /// True for the operation whose derivation records borrows
    pub fn uses_borrows(&self) -> bool {
        matches!(self, Self::Subtract)
    }

    /// True for the operation whose derivation records per-step remainders
    pub fn uses_remainders(&self) -> bool {
        matches!(self, Self::Divide)
    }

    /// True when the second operand is a per-problem scalar, not a digit row
    pub fn scalar_operand(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Subtract => write!(f, "subtract"),
            Self::Multiply => write!(f, "multiply"),
            Self::Divide => write!(f, "divide"),
        }
    }
}

/// Difficulty tier controlling operand magnitude
///
/// Easy draws two-digit operands, medium three, pro four. The upper bound is
/// exclusive when operands are drawn at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Pro,
}

impl DifficultyTier {
    /// Operand range as (min, max), max exclusive for random draws
    pub fn operand_range(&self) -> (u32, u32) {
        match self {
            Self::Easy => (10, 99),
            Self::Medium => (100, 999),
            Self::Pro => (1000, 9999),
        }
    }

    /// Number of decimal digits at this tier
    pub fn digit_len(&self) -> usize {
        match self {
            Self::Easy => 2,
            Self::Medium => 3,
            Self::Pro => 4,
        }
    }

    /// Maps a school year level (1-6) to a tier
    ///
    /// Years 1-2 practice at easy, 3-4 at medium, 5 and above at pro.
    pub fn from_year(year: u8) -> Self {
        match year {
            3 | 4 => Self::Medium,
            y if y >= 5 => Self::Pro,
            _ => Self::Easy,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Pro => write!(f, "pro"),
        }
    }
}
