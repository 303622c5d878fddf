//! Session audit trail

use problem_types::{ActiveCell, CellField, ProblemId};
use serde::{Deserialize, Serialize};

use crate::outcome::WarningKind;

/// Session event for the audit trail
///
/// Every accepted mutation appends one entry, stamped with a session-local
/// monotonic sequence number. The host may drain the trail for analytics or
/// debugging; the core only records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Focus moved to a cell
    Focused { cell: ActiveCell, seq: u64 },
    /// A click was redirected to a prerequisite cell
    Redirected {
        requested_column: usize,
        cell: ActiveCell,
        seq: u64,
    },
    /// A click was refused with a warning highlight
    Warned {
        problem_id: ProblemId,
        column: usize,
        kind: WarningKind,
        seq: u64,
    },
    /// A digit was recorded at a cell
    DigitRecorded {
        cell: ActiveCell,
        digit: char,
        seq: u64,
    },
    /// A cell's entry was removed
    CellCleared { cell: ActiveCell, seq: u64 },
    /// A slash mark was flipped
    SlashToggled {
        problem_id: ProblemId,
        column: usize,
        on: bool,
        seq: u64,
    },
    /// A problem was graded and locked
    ProblemLocked {
        problem_id: ProblemId,
        correct: bool,
        seq: u64,
    },
    /// Correction mode began on a locked problem
    CorrectionStarted { problem_id: ProblemId, seq: u64 },
    /// Correction mode ended
    CorrectionFinished { problem_id: ProblemId, seq: u64 },
}

impl SessionEvent {
    /// The event's sequence number
    pub fn seq(&self) -> u64 {
        match self {
            Self::Focused { seq, .. }
            | Self::Redirected { seq, .. }
            | Self::Warned { seq, .. }
            | Self::DigitRecorded { seq, .. }
            | Self::CellCleared { seq, .. }
            | Self::SlashToggled { seq, .. }
            | Self::ProblemLocked { seq, .. }
            | Self::CorrectionStarted { seq, .. }
            | Self::CorrectionFinished { seq, .. } => *seq,
        }
    }

    /// The field written by this event, if it records a digit
    pub fn recorded_field(&self) -> Option<CellField> {
        match self {
            Self::DigitRecorded { cell, .. } => Some(cell.field),
            _ => None,
        }
    }
}
