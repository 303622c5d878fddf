use problem_types::ProblemId;
use thiserror::Error;

/// Session error types
///
/// The only failure surface of the state machine: addressing a problem the
/// session does not own, or correcting one that was never graded. Ordinary
/// gated input is not an error; it comes back as an [`crate::InputOutcome`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown problem: {0}")]
    UnknownProblem(ProblemId),

    #[error("Problem not locked for grading: {0}")]
    ProblemNotLocked(ProblemId),
}
