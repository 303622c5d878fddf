//! The quiz session state machine

use std::collections::{BTreeSet, HashMap, HashSet};

use grading::validate;
use problem_gen::generate_quiz;
use problem_types::{
    ActiveCell, CellField, MathProblem, Operation, ProblemId, QuizConfig, UserAnswerState,
    ValidationResult,
};
use rand::{thread_rng, Rng};

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::outcome::{InputOutcome, Warning};
use crate::rules::{self, SubtractReadiness};

/// One learner working one quiz
///
/// Owns the problem list, one [`UserAnswerState`] per problem, the single
/// optional focus cell, the locked set with recorded grades, the optional
/// correction problem, and the audit trail. Every mutation is one discrete
/// input event processed to completion; auto-advance focus moves are applied
/// immediately and surfaced in the returned outcome for the caller to pace.
pub struct QuizSession {
    problems: Vec<MathProblem>,
    answers: HashMap<ProblemId, UserAnswerState>,
    active: Option<ActiveCell>,
    locked: HashSet<ProblemId>,
    results: HashMap<ProblemId, ValidationResult>,
    correction: Option<ProblemId>,
    correction_result: Option<ValidationResult>,
    events: Vec<SessionEvent>,
    next_seq: u64,
}

impl QuizSession {
    /// Creates a session over pre-generated problems
    ///
    /// Focus starts on the first problem's entry cell: the division start
    /// column for division, the units column otherwise.
    pub fn new(problems: Vec<MathProblem>) -> Self {
        let answers = problems
            .iter()
            .map(|p| (p.id(), UserAnswerState::new()))
            .collect();
        let active = problems.first().map(|p| {
            ActiveCell::new(p.id(), rules::entry_column(p), CellField::Answer)
        });

        let mut session = Self {
            problems,
            answers,
            active,
            locked: HashSet::new(),
            results: HashMap::new(),
            correction: None,
            correction_result: None,
            events: Vec::new(),
            next_seq: 0,
        };
        if let Some(cell) = session.active {
            session.push_event(|seq| SessionEvent::Focused { cell, seq });
        }
        session
    }

    /// Generates a fresh quiz from `config` with the supplied rng
    pub fn generate_with<R: Rng>(rng: &mut R, config: &QuizConfig) -> Self {
        Self::new(generate_quiz(rng, config))
    }

    /// Generates a fresh quiz from `config` with the thread-local rng
    pub fn generate(config: &QuizConfig) -> Self {
        Self::generate_with(&mut thread_rng(), config)
    }

    // Accessors for rendering/testing

    pub fn problems(&self) -> &[MathProblem] {
        &self.problems
    }

    pub fn problem(&self, problem_id: ProblemId) -> Option<&MathProblem> {
        self.problems.iter().find(|p| p.id() == problem_id)
    }

    pub fn answer_state(&self, problem_id: ProblemId) -> Option<&UserAnswerState> {
        self.answers.get(&problem_id)
    }

    pub fn active_cell(&self) -> Option<ActiveCell> {
        self.active
    }

    pub fn is_locked(&self, problem_id: ProblemId) -> bool {
        self.locked.contains(&problem_id)
    }

    /// The grade recorded when the problem was locked, if any
    pub fn recorded_result(&self, problem_id: ProblemId) -> Option<&ValidationResult> {
        self.results.get(&problem_id)
    }

    pub fn correction_problem(&self) -> Option<ProblemId> {
        self.correction
    }

    pub fn correction_result(&self) -> Option<&ValidationResult> {
        self.correction_result.as_ref()
    }

    /// The audit trail, in event order
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    // Input events

    /// Applies a cell click, enforcing the per-operation fill order
    ///
    /// Gates run in order: prerequisite-blink redirect, division ordering,
    /// low-to-high ordering, subtraction readiness. A gated click either
    /// redirects focus to the prerequisite cell or is rejected with a
    /// transient warning on the proper target; an ungated click focuses the
    /// requested cell.
    pub fn click_cell(
        &mut self,
        problem_id: ProblemId,
        column: usize,
        field: CellField,
    ) -> Result<InputOutcome, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;

        if self.is_read_only(problem_id) {
            return Ok(InputOutcome::Ignored);
        }
        if column >= problem.column_count() {
            return Ok(InputOutcome::Ignored);
        }

        let problem = problem.clone();
        let answers = self
            .answers
            .get(&problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;

        // Gate 1: a lower-priority cell must be filled first
        if field == CellField::Answer {
            if let Some((col, redirect_field)) = rules::blink_redirect(&problem, answers, column)
            {
                let cell = ActiveCell::new(problem_id, col, redirect_field);
                let warning = Warning::target(problem_id, col);
                self.active = Some(cell);
                self.push_event(|seq| SessionEvent::Redirected {
                    requested_column: column,
                    cell,
                    seq,
                });
                return Ok(InputOutcome::Redirected {
                    cell,
                    warning: Some(warning),
                });
            }
        }

        // Gate 2: division fills from the start column strictly downward
        if problem.operation() == Operation::Divide && field == CellField::Answer {
            let start = problem.division_start_column();
            match start {
                Some(start) if column > start => {
                    return Ok(self.reject(Warning::target(problem_id, start)));
                }
                None => {
                    return Ok(self.reject(Warning::target(problem_id, 0)));
                }
                _ => {}
            }
            if let Some(target) = rules::next_unfilled_division(&problem, answers) {
                if column < target {
                    return Ok(self.reject(Warning::target(problem_id, target)));
                }
            }
        }

        // Gate 3: everything else fills low to high
        if problem.operation() != Operation::Divide && field == CellField::Answer {
            if let Some(target) = rules::next_unfilled_low_to_high(&problem, answers) {
                if column > target {
                    return Ok(self.reject(Warning::target(problem_id, target)));
                }
            }
        }

        // Gate 4: a borrowing column needs slash, carry, and borrow first
        if problem.operation() == Operation::Subtract && field == CellField::Answer {
            match rules::subtraction_readiness(&problem, answers, column) {
                SubtractReadiness::Ready => {}
                SubtractReadiness::NeedsSlash { neighbor } => {
                    return Ok(self.reject(Warning::slash(problem_id, neighbor)));
                }
                SubtractReadiness::Redirect {
                    column: col,
                    field: redirect_field,
                } => {
                    let cell = ActiveCell::new(problem_id, col, redirect_field);
                    self.active = Some(cell);
                    self.push_event(|seq| SessionEvent::Redirected {
                        requested_column: column,
                        cell,
                        seq,
                    });
                    return Ok(InputOutcome::Redirected {
                        cell,
                        warning: None,
                    });
                }
            }
        }

        let cell = ActiveCell::new(problem_id, column, field);
        self.active = Some(cell);
        self.push_event(|seq| SessionEvent::Focused { cell, seq });
        Ok(InputOutcome::Focused { cell })
    }

    /// Flips the slash mark on a column
    ///
    /// Turning it on moves focus to the column's remainder (divide) or carry
    /// (subtract); the move is immediate in state, deferred only on screen.
    pub fn toggle_slash(
        &mut self,
        problem_id: ProblemId,
        column: usize,
    ) -> Result<InputOutcome, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;

        if self.is_read_only(problem_id) {
            return Ok(InputOutcome::Ignored);
        }
        if column >= problem.column_count() {
            return Ok(InputOutcome::Ignored);
        }

        let operation = problem.operation();
        let on = self
            .answers
            .entry(problem_id)
            .or_default()
            .toggle_slash(column);

        let next_focus = if on {
            match operation {
                Operation::Divide => {
                    Some(ActiveCell::new(problem_id, column, CellField::Remainder))
                }
                Operation::Subtract => {
                    Some(ActiveCell::new(problem_id, column, CellField::Carry))
                }
                _ => None,
            }
        } else {
            None
        };
        if let Some(cell) = next_focus {
            self.active = Some(cell);
        }

        self.push_event(|seq| SessionEvent::SlashToggled {
            problem_id,
            column,
            on,
            seq,
        });
        Ok(InputOutcome::SlashToggled { on, next_focus })
    }

    /// Records a digit into the active cell and auto-advances focus
    ///
    /// Ignored when nothing is focused, when `problem_id` is not the focused
    /// problem, or when `digit` is not a numeral. A division answer write
    /// also slashes its column.
    pub fn press_digit(
        &mut self,
        problem_id: ProblemId,
        digit: char,
    ) -> Result<InputOutcome, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?
            .clone();

        if self.is_read_only(problem_id) || !digit.is_ascii_digit() {
            return Ok(InputOutcome::Ignored);
        }
        let cell = match self.active {
            Some(cell) if cell.problem_id == problem_id => cell,
            _ => return Ok(InputOutcome::Ignored),
        };

        let answers = self.answers.entry(problem_id).or_default();
        answers.set_digit(cell.field, cell.column, digit);
        if problem.operation() == Operation::Divide && cell.field == CellField::Answer {
            answers.set_slashed(cell.column);
        }

        let next_focus = rules::auto_advance(&problem, answers, cell.column, cell.field)
            .map(|(col, field)| ActiveCell::new(problem_id, col, field));
        if let Some(next) = next_focus {
            self.active = Some(next);
        }

        self.push_event(|seq| SessionEvent::DigitRecorded { cell, digit, seq });
        Ok(InputOutcome::Recorded { next_focus })
    }

    /// Removes the active cell's entry without moving focus
    pub fn delete(&mut self) -> InputOutcome {
        let Some(cell) = self.active else {
            return InputOutcome::Ignored;
        };
        let Some(answers) = self.answers.get_mut(&cell.problem_id) else {
            return InputOutcome::Ignored;
        };
        answers.clear_digit(cell.field, cell.column);
        self.push_event(|seq| SessionEvent::CellCleared { cell, seq });
        InputOutcome::Cleared
    }

    // Derived queries

    /// Answer columns currently blocked behind an unfilled prerequisite
    pub fn blocked_answer_columns(
        &self,
        problem_id: ProblemId,
    ) -> Result<BTreeSet<usize>, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        let answers = self
            .answers
            .get(&problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        Ok(rules::blocked_answer_columns(problem, answers))
    }

    /// True when every field the problem's operation requires is filled
    pub fn is_problem_complete(&self, problem_id: ProblemId) -> Result<bool, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        let answers = self
            .answers
            .get(&problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        Ok(rules::is_problem_complete(problem, answers))
    }

    pub fn all_complete(&self) -> bool {
        self.problems.iter().all(|p| {
            self.answers
                .get(&p.id())
                .is_some_and(|a| rules::is_problem_complete(p, a))
        })
    }

    pub fn all_graded(&self) -> bool {
        !self.problems.is_empty() && self.problems.iter().all(|p| self.locked.contains(&p.id()))
    }

    pub fn total_correct(&self) -> usize {
        self.results.values().filter(|r| r.is_correct).count()
    }

    // Grading and locking

    /// Grades one problem and locks it read-only
    ///
    /// Idempotent: a locked problem returns its recorded grade unchanged.
    /// Focus is cleared; the caller navigates explicitly afterwards.
    pub fn grade_problem(
        &mut self,
        problem_id: ProblemId,
    ) -> Result<ValidationResult, SessionError> {
        if let Some(result) = self.results.get(&problem_id) {
            return Ok(result.clone());
        }
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        let answers = self
            .answers
            .get(&problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;

        let result = validate(problem, answers);
        self.locked.insert(problem_id);
        self.results.insert(problem_id, result.clone());
        self.active = None;
        let correct = result.is_correct;
        self.push_event(|seq| SessionEvent::ProblemLocked {
            problem_id,
            correct,
            seq,
        });
        Ok(result)
    }

    /// Grades every problem, locking the whole quiz; returns the correct count
    pub fn grade_all(&mut self) -> usize {
        let ids: Vec<ProblemId> = self.problems.iter().map(|p| p.id()).collect();
        for id in ids {
            // Ids come from the session's own list
            let _ = self.grade_problem(id);
        }
        self.active = None;
        self.total_correct()
    }

    /// The finished `(problem, answers, validation)` tuples for graded
    /// problems, in quiz order: the payload for an external results sink
    pub fn finished_results(
        &self,
    ) -> Vec<(&MathProblem, &UserAnswerState, &ValidationResult)> {
        self.problems
            .iter()
            .filter_map(|p| {
                let result = self.results.get(&p.id())?;
                let answers = self.answers.get(&p.id())?;
                Some((p, answers, result))
            })
            .collect()
    }

    // Navigation between problems

    /// Moves focus to a problem's entry cell
    pub fn focus_problem(&mut self, problem_id: ProblemId) -> Result<InputOutcome, SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        if self.is_read_only(problem_id) {
            return Ok(InputOutcome::Ignored);
        }
        let cell = ActiveCell::new(problem_id, rules::entry_column(problem), CellField::Answer);
        self.active = Some(cell);
        self.push_event(|seq| SessionEvent::Focused { cell, seq });
        Ok(InputOutcome::Focused { cell })
    }

    // Correction mode

    /// Reopens a locked problem for another attempt
    ///
    /// Clears its answer state and focuses its entry cell. The recorded
    /// grade is untouched; a later [`Self::check_correction`] grades the
    /// redo separately.
    pub fn start_correction(&mut self, problem_id: ProblemId) -> Result<(), SessionError> {
        let problem = self
            .problem(problem_id)
            .ok_or(SessionError::UnknownProblem(problem_id))?;
        if !self.locked.contains(&problem_id) {
            return Err(SessionError::ProblemNotLocked(problem_id));
        }

        let entry = rules::entry_column(problem);
        self.answers.entry(problem_id).or_default().clear();
        self.correction = Some(problem_id);
        self.correction_result = None;
        let cell = ActiveCell::new(problem_id, entry, CellField::Answer);
        self.active = Some(cell);
        self.push_event(|seq| SessionEvent::CorrectionStarted { problem_id, seq });
        self.push_event(|seq| SessionEvent::Focused { cell, seq });
        Ok(())
    }

    /// Grades the correction attempt without touching the recorded grade
    pub fn check_correction(&mut self) -> Option<ValidationResult> {
        let problem_id = self.correction?;
        let problem = self.problem(problem_id)?;
        let answers = self.answers.get(&problem_id)?;
        let result = validate(problem, answers);
        self.correction_result = Some(result.clone());
        self.active = None;
        Some(result)
    }

    /// Leaves correction mode; the redone work stays visible to the host
    pub fn finish_correction(&mut self) {
        if let Some(problem_id) = self.correction.take() {
            self.correction_result = None;
            self.active = None;
            self.push_event(|seq| SessionEvent::CorrectionFinished { problem_id, seq });
        }
    }

    // Internals

    /// Locked problems are read-only except while under correction
    fn is_read_only(&self, problem_id: ProblemId) -> bool {
        self.locked.contains(&problem_id) && self.correction != Some(problem_id)
    }

    fn reject(&mut self, warning: Warning) -> InputOutcome {
        self.push_event(|seq| SessionEvent::Warned {
            problem_id: warning.problem_id,
            column: warning.column,
            kind: warning.kind,
            seq,
        });
        InputOutcome::Rejected { warning }
    }

    fn push_event(&mut self, make: impl FnOnce(u64) -> SessionEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(make(seq));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::WarningKind;
    use problem_gen::decompose;

    fn problem(index: usize, num1: u32, num2: u32, operation: Operation) -> MathProblem {
        MathProblem::new(
            ProblemId::new(),
            index,
            num1,
            num2,
            operation,
            decompose(num1, num2, operation),
        )
    }

    fn cell(problem_id: ProblemId, column: usize, field: CellField) -> ActiveCell {
        ActiveCell::new(problem_id, column, field)
    }

    #[test]
    fn test_new_session_focuses_first_units_column() {
        let session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 0, CellField::Answer))
        );
    }

    #[test]
    fn test_new_division_session_focuses_start_column() {
        let session = QuizSession::new(vec![problem(0, 84, 4, Operation::Divide)]);
        let id = session.problems()[0].id();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 1, CellField::Answer))
        );
    }

    #[test]
    fn test_empty_session_has_no_focus() {
        let session = QuizSession::new(Vec::new());
        assert_eq!(session.active_cell(), None);
        assert!(!session.all_graded());
    }

    #[test]
    fn test_unknown_problem_is_an_error() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let stranger = ProblemId::new();
        assert_eq!(
            session.click_cell(stranger, 0, CellField::Answer),
            Err(SessionError::UnknownProblem(stranger))
        );
    }

    #[test]
    fn test_click_ahead_is_rejected_with_target_warning() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();

        let outcome = session.click_cell(id, 1, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Rejected {
                warning: Warning::target(id, 0)
            }
        );
        // Focus did not move
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 0, CellField::Answer))
        );
    }

    #[test]
    fn test_add_carry_walkthrough() {
        // 27 + 15 = 42
        let mut session = QuizSession::new(vec![problem(0, 27, 15, Operation::Add)]);
        let id = session.problems()[0].id();

        let outcome = session.press_digit(id, '2').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 1, CellField::Carry))
            }
        );

        // Clicking the tens answer now redirects back to the blank carry
        let outcome = session.click_cell(id, 1, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Redirected {
                cell: cell(id, 1, CellField::Carry),
                warning: Some(Warning::target(id, 1)),
            }
        );

        let outcome = session.press_digit(id, '1').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 1, CellField::Answer))
            }
        );

        session.press_digit(id, '4').unwrap();
        assert!(session.is_problem_complete(id).unwrap());
        assert!(session.grade_problem(id).unwrap().is_correct);
    }

    #[test]
    fn test_subtract_slash_warning_before_borrowing_column() {
        // 52 - 27: the units column borrows
        let mut session = QuizSession::new(vec![problem(0, 52, 27, Operation::Subtract)]);
        let id = session.problems()[0].id();

        let outcome = session.click_cell(id, 0, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Rejected {
                warning: Warning::slash(id, 1)
            }
        );
        // Focus must NOT move to the clicked cell
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 0, CellField::Answer))
        );
    }

    #[test]
    fn test_subtract_full_walkthrough() {
        let mut session = QuizSession::new(vec![problem(0, 52, 27, Operation::Subtract)]);
        let id = session.problems()[0].id();

        // Slash the tens digit; focus drops into its carry cell
        let outcome = session.toggle_slash(id, 1).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::SlashToggled {
                on: true,
                next_focus: Some(cell(id, 1, CellField::Carry))
            }
        );

        // Reduced digit 4, then the borrow mark one column below
        let outcome = session.press_digit(id, '4').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 0, CellField::Borrow))
            }
        );
        let outcome = session.press_digit(id, '1').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 0, CellField::Answer))
            }
        );

        session.press_digit(id, '5').unwrap();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 1, CellField::Answer))
        );
        session.press_digit(id, '2').unwrap();

        assert!(session.is_problem_complete(id).unwrap());
        assert!(session.grade_problem(id).unwrap().is_correct);
    }

    #[test]
    fn test_subtract_readiness_redirects_without_warning() {
        let mut session = QuizSession::new(vec![problem(0, 52, 27, Operation::Subtract)]);
        let id = session.problems()[0].id();

        session.toggle_slash(id, 1).unwrap();
        // Carry still blank: clicking the borrowing answer redirects silently
        let outcome = session.click_cell(id, 0, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Redirected {
                cell: cell(id, 1, CellField::Carry),
                warning: None,
            }
        );
    }

    #[test]
    fn test_divide_click_above_start_column_is_rejected() {
        // 36 / 5: start column is 0, the tens column is the leading zero
        let mut session = QuizSession::new(vec![problem(0, 36, 5, Operation::Divide)]);
        let id = session.problems()[0].id();

        let outcome = session.click_cell(id, 1, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Rejected {
                warning: Warning::target(id, 0)
            }
        );
    }

    #[test]
    fn test_divide_click_below_next_target_is_rejected() {
        let mut session = QuizSession::new(vec![problem(0, 84, 4, Operation::Divide)]);
        let id = session.problems()[0].id();

        let outcome = session.click_cell(id, 0, CellField::Answer).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Rejected {
                warning: Warning::target(id, 1)
            }
        );
    }

    #[test]
    fn test_divide_walkthrough_auto_slashes_and_records_remainder() {
        // 36 / 5 = 7 remainder 1
        let mut session = QuizSession::new(vec![problem(0, 36, 5, Operation::Divide)]);
        let id = session.problems()[0].id();

        let outcome = session.press_digit(id, '7').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 0, CellField::Remainder))
            }
        );
        // The answer write slashed its own column
        assert!(session.answer_state(id).unwrap().is_slashed(0));

        let outcome = session.press_digit(id, '1').unwrap();
        assert_eq!(outcome, InputOutcome::Recorded { next_focus: None });

        assert!(session.is_problem_complete(id).unwrap());
        assert!(session.grade_problem(id).unwrap().is_correct);
    }

    #[test]
    fn test_divide_even_steps_walk_straight_down() {
        // 84 / 4 = 21, no remainders
        let mut session = QuizSession::new(vec![problem(0, 84, 4, Operation::Divide)]);
        let id = session.problems()[0].id();

        let outcome = session.press_digit(id, '2').unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Recorded {
                next_focus: Some(cell(id, 0, CellField::Answer))
            }
        );
        session.press_digit(id, '1').unwrap();
        assert!(session.is_problem_complete(id).unwrap());
        assert!(session.grade_problem(id).unwrap().is_correct);
    }

    #[test]
    fn test_multiply_walkthrough_with_overflow_column() {
        // 27 * 5 = 135
        let mut session = QuizSession::new(vec![problem(0, 27, 5, Operation::Multiply)]);
        let id = session.problems()[0].id();

        session.press_digit(id, '5').unwrap();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 1, CellField::Carry))
        );
        session.press_digit(id, '3').unwrap();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 1, CellField::Answer))
        );
        session.press_digit(id, '3').unwrap();
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 2, CellField::Carry))
        );
        session.press_digit(id, '1').unwrap();
        session.press_digit(id, '1').unwrap();

        assert!(session.is_problem_complete(id).unwrap());
        assert!(session.grade_problem(id).unwrap().is_correct);
    }

    #[test]
    fn test_press_digit_requires_matching_focus() {
        let mut session = QuizSession::new(vec![
            problem(0, 23, 45, Operation::Add),
            problem(1, 31, 12, Operation::Add),
        ]);
        let second = session.problems()[1].id();

        // Focus is on the first problem
        assert_eq!(
            session.press_digit(second, '4').unwrap(),
            InputOutcome::Ignored
        );
        assert!(session.answer_state(second).unwrap().is_empty());
    }

    #[test]
    fn test_press_non_digit_is_ignored() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();
        assert_eq!(session.press_digit(id, 'x').unwrap(), InputOutcome::Ignored);
        assert!(session.answer_state(id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_clears_without_moving_focus() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();

        session.press_digit(id, '8').unwrap();
        // Move back onto the filled cell and erase it
        session.click_cell(id, 0, CellField::Answer).unwrap();
        assert_eq!(session.delete(), InputOutcome::Cleared);
        assert!(!session
            .answer_state(id)
            .unwrap()
            .is_filled(CellField::Answer, 0));
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 0, CellField::Answer))
        );
    }

    #[test]
    fn test_delete_with_no_focus_is_ignored() {
        let mut session = QuizSession::new(Vec::new());
        assert_eq!(session.delete(), InputOutcome::Ignored);
    }

    #[test]
    fn test_grading_locks_and_clears_focus() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();

        session.press_digit(id, '8').unwrap();
        session.press_digit(id, '6').unwrap();
        let result = session.grade_problem(id).unwrap();
        assert!(result.is_correct);
        assert!(session.is_locked(id));
        assert_eq!(session.active_cell(), None);

        // Locked problems ignore further input
        assert_eq!(
            session.click_cell(id, 0, CellField::Answer).unwrap(),
            InputOutcome::Ignored
        );
        assert_eq!(
            session.toggle_slash(id, 0).unwrap(),
            InputOutcome::Ignored
        );
        assert_eq!(session.press_digit(id, '9').unwrap(), InputOutcome::Ignored);

        // Re-grading returns the recorded result unchanged
        assert_eq!(session.grade_problem(id).unwrap(), result);
    }

    #[test]
    fn test_grade_all_counts_correct_problems() {
        let mut session = QuizSession::new(vec![
            problem(0, 23, 45, Operation::Add),
            problem(1, 31, 12, Operation::Add),
        ]);
        let first = session.problems()[0].id();

        session.press_digit(first, '8').unwrap();
        session.press_digit(first, '6').unwrap();

        // Second problem left blank: wrong
        assert_eq!(session.grade_all(), 1);
        assert!(session.all_graded());
        assert_eq!(session.total_correct(), 1);
        assert_eq!(session.finished_results().len(), 2);
    }

    #[test]
    fn test_correction_mode_preserves_recorded_grade() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();

        // Grade an empty attempt: wrong
        let recorded = session.grade_problem(id).unwrap();
        assert!(!recorded.is_correct);

        session.start_correction(id).unwrap();
        assert_eq!(session.correction_problem(), Some(id));
        assert!(session.answer_state(id).unwrap().is_empty());
        assert_eq!(
            session.active_cell(),
            Some(cell(id, 0, CellField::Answer))
        );

        // Redo correctly this time
        session.press_digit(id, '8').unwrap();
        session.press_digit(id, '6').unwrap();
        let redo = session.check_correction().unwrap();
        assert!(redo.is_correct);
        assert_eq!(session.active_cell(), None);

        // The recorded grade never changes
        assert_eq!(session.recorded_result(id), Some(&recorded));
        assert_eq!(session.total_correct(), 0);

        session.finish_correction();
        assert_eq!(session.correction_problem(), None);
        assert_eq!(session.correction_result(), None);
    }

    #[test]
    fn test_correction_requires_a_locked_problem() {
        let mut session = QuizSession::new(vec![problem(0, 23, 45, Operation::Add)]);
        let id = session.problems()[0].id();
        assert_eq!(
            session.start_correction(id),
            Err(SessionError::ProblemNotLocked(id))
        );
    }

    #[test]
    fn test_focus_problem_moves_to_entry_cell() {
        let mut session = QuizSession::new(vec![
            problem(0, 23, 45, Operation::Add),
            problem(1, 84, 4, Operation::Divide),
        ]);
        let second = session.problems()[1].id();

        let outcome = session.focus_problem(second).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::Focused {
                cell: cell(second, 1, CellField::Answer)
            }
        );
    }

    #[test]
    fn test_toggle_slash_off_does_not_move_focus() {
        let mut session = QuizSession::new(vec![problem(0, 52, 27, Operation::Subtract)]);
        let id = session.problems()[0].id();

        session.toggle_slash(id, 1).unwrap();
        let outcome = session.toggle_slash(id, 1).unwrap();
        assert_eq!(
            outcome,
            InputOutcome::SlashToggled {
                on: false,
                next_focus: None
            }
        );
        assert!(!session.answer_state(id).unwrap().is_slashed(1));
    }

    #[test]
    fn test_audit_trail_sequences_monotonically() {
        let mut session = QuizSession::new(vec![problem(0, 27, 15, Operation::Add)]);
        let id = session.problems()[0].id();

        session.press_digit(id, '2').unwrap();
        session.click_cell(id, 1, CellField::Answer).unwrap();
        session.press_digit(id, '1').unwrap();
        session.delete();

        let events = session.events();
        assert!(events.len() >= 4);
        for pair in events.windows(2) {
            assert!(pair[0].seq() < pair[1].seq());
        }
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::Redirected { .. })));

        // The trail is serializable for the host to drain
        let json = serde_json::to_string(events).unwrap();
        let back: Vec<SessionEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, back.as_slice());
    }

    #[test]
    fn test_rejected_warning_kinds() {
        let mut session = QuizSession::new(vec![problem(0, 52, 27, Operation::Subtract)]);
        let id = session.problems()[0].id();

        let outcome = session.click_cell(id, 0, CellField::Answer).unwrap();
        let InputOutcome::Rejected { warning } = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(warning.kind, WarningKind::Slash);
        assert_eq!(warning.column, 1);
    }
}
