//! # Session Core
//!
//! This crate implements the interactive cursor state machine for a quiz
//! session: one focus cell, strict fill-order gating per operation, and
//! auto-advance after each accepted digit.
//!
//! ## Philosophy
//!
//! - **Explicit focus**: the active cell is a value owned by the session,
//!   threaded through every navigation call; never ambient state
//! - **Outcomes, not exceptions**: gated or premature input is ignored or
//!   redirected with a transient warning, expressed as a returned outcome
//! - **Timer-free**: deferred auto-advance is the focus value in the
//!   returned outcome; any perceptual delay belongs to the caller
//! - **Auditable**: every accepted mutation appends a serializable event
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer (no layout, no highlight timers)
//! - A persistence layer (finished results are handed over as tuples)
//! - A grader (the grading crate computes verdicts; this crate only locks)

mod error;
mod events;
mod outcome;
mod rules;
mod session;

pub use error::SessionError;
pub use events::SessionEvent;
pub use outcome::{InputOutcome, Warning, WarningKind};
pub use rules::{blocked_answer_columns, is_problem_complete};
pub use session::QuizSession;
