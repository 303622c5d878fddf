//! Problem factory
//!
//! Composes operand generation and column decomposition into immutable
//! [`MathProblem`] values with fresh ids.

use problem_types::{DifficultyTier, MathProblem, Operation, ProblemId, QuizConfig};
use rand::{thread_rng, Rng};

use crate::columns::decompose;
use crate::operands::generate_operands;

/// Generates one problem with the supplied rng
///
/// `index` is the problem's position within its quiz.
pub fn generate_problem_with<R: Rng>(
    rng: &mut R,
    tier: DifficultyTier,
    index: usize,
    operation: Operation,
    include_borrowing: Option<bool>,
) -> MathProblem {
    let (num1, num2) = generate_operands(rng, operation, tier, include_borrowing);
    let columns = decompose(num1, num2, operation);
    MathProblem::new(ProblemId::new(), index, num1, num2, operation, columns)
}

/// Generates one problem from the thread-local rng
pub fn generate_problem(
    tier: DifficultyTier,
    index: usize,
    operation: Operation,
    include_borrowing: Option<bool>,
) -> MathProblem {
    generate_problem_with(&mut thread_rng(), tier, index, operation, include_borrowing)
}

/// Legacy entry point keyed by school year level
pub fn generate_problem_for_year(year: u8, index: usize, operation: Operation) -> MathProblem {
    generate_problem(DifficultyTier::from_year(year), index, operation, None)
}

/// Generates a whole quiz up front, with sequential indices
pub fn generate_quiz<R: Rng>(rng: &mut R, config: &QuizConfig) -> Vec<MathProblem> {
    (0..config.count)
        .map(|index| {
            generate_problem_with(
                rng,
                config.difficulty,
                index,
                config.operation,
                config.include_borrowing,
            )
        })
        .collect()
}
