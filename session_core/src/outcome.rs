//! Outcomes returned from session input

use problem_types::{ActiveCell, ProblemId};
use serde::{Deserialize, Serialize};

/// Kind of transient warning highlight
///
/// `Target` marks the cell that must be filled instead; `Slash` asks for a
/// digit to be crossed out first (no single redirect cell exists for it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Target,
    Slash,
}

/// A transient warning highlight hint
///
/// Warnings are returned, never stored: the caller decides how long the
/// highlight lives on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub problem_id: ProblemId,
    pub column: usize,
    pub kind: WarningKind,
}

impl Warning {
    pub fn target(problem_id: ProblemId, column: usize) -> Self {
        Self {
            problem_id,
            column,
            kind: WarningKind::Target,
        }
    }

    pub fn slash(problem_id: ProblemId, column: usize) -> Self {
        Self {
            problem_id,
            column,
            kind: WarningKind::Slash,
        }
    }
}

/// Outcome of applying one input event to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input was accepted but changed nothing (locked problem, empty focus)
    Ignored,
    /// Focus moved to the requested cell
    Focused { cell: ActiveCell },
    /// Focus was redirected to a prerequisite cell instead
    Redirected {
        cell: ActiveCell,
        warning: Option<Warning>,
    },
    /// Input was refused; focus is unchanged
    Rejected { warning: Warning },
    /// A digit was recorded; `next_focus` is the deferred auto-advance,
    /// already applied to session state
    Recorded { next_focus: Option<ActiveCell> },
    /// The active cell's entry was removed
    Cleared,
    /// A slash mark was flipped; turning it on may move focus
    SlashToggled {
        on: bool,
        next_focus: Option<ActiveCell>,
    },
}
