//! Operand pair generation
//!
//! Every operation draws operands within the difficulty tier's range. The
//! interesting case is borrow-free subtraction, which is synthesized
//! constructively digit by digit with a bounded retry loop and a
//! deterministic fallback, so generation can never fail.

use problem_types::{DifficultyTier, Operation};
use rand::Rng;

use crate::digits::{decimal_len, digits_lsb, digits_msb, from_digits_msb};

const NO_BORROW_ATTEMPTS: usize = 100;

/// Generates an operand pair for `operation` at `tier`
///
/// `include_borrowing` applies to subtraction only: `Some(false)` yields a
/// pair that subtracts without borrowing at every aligned position;
/// `Some(true)` or `None` allows borrowing. Multiplication and division use
/// a single-digit second operand.
pub fn generate_operands<R: Rng>(
    rng: &mut R,
    operation: Operation,
    tier: DifficultyTier,
    include_borrowing: Option<bool>,
) -> (u32, u32) {
    let (min, max) = tier.operand_range();
    match operation {
        Operation::Add => (rng.gen_range(min..max), rng.gen_range(min..max)),
        Operation::Subtract => {
            if include_borrowing == Some(false) {
                no_borrow_pair(rng, min, max)
            } else {
                let num1 = rng.gen_range(min..max);
                let num2 = rng.gen_range(1..num1);
                (num1, num2)
            }
        }
        Operation::Multiply => (rng.gen_range(min..max), rng.gen_range(2..=9)),
        Operation::Divide => {
            let divisor = rng.gen_range(2..=9);
            (rng.gen_range(min..max), divisor)
        }
    }
}

/// True when `num1 - num2` needs a borrow at any aligned digit position
pub fn requires_borrowing(num1: u32, num2: u32) -> bool {
    let d1 = digits_lsb(num1);
    let d2 = digits_lsb(num2);
    d2.iter()
        .enumerate()
        .any(|(i, &b)| d1.get(i).copied().unwrap_or(0) < b)
}

/// Synthesizes a subtraction pair with no borrowing at any position
///
/// Builds `num2` under `num1` digit by digit, keeping every digit at or
/// below the aligned `num1` digit and forcing at least one strictly smaller
/// digit so the difference is nonzero. Candidates for `num1` whose
/// non-leading digits are all zero are rejected outright: they admit no
/// positive borrow-free `num2`.
fn no_borrow_pair<R: Rng>(rng: &mut R, min: u32, max: u32) -> (u32, u32) {
    for _ in 0..NO_BORROW_ATTEMPTS {
        let num1 = rng.gen_range(min..max);
        let d1 = digits_msb(num1);

        if d1.len() > 1 && d1[1..].iter().all(|&d| d == 0) {
            continue;
        }

        let mut d2 = Vec::with_capacity(d1.len());
        let mut made_smaller = false;
        for (i, &top) in d1.iter().enumerate() {
            let min_digit = if i == 0 && d1.len() > 1 { 1 } else { 0 };
            if top < min_digit {
                d2.push(min_digit);
                continue;
            }
            let digit = if !made_smaller && top > min_digit {
                made_smaller = true;
                rng.gen_range(min_digit..top)
            } else {
                let d = rng.gen_range(min_digit..=top);
                if d < top {
                    made_smaller = true;
                }
                d
            };
            d2.push(digit);
        }

        let num2 = from_digits_msb(&d2).max(1);
        if num2 < num1 && !requires_borrowing(num1, num2) {
            return (num1, num2);
        }
    }

    fallback_pair(rng, min)
}

/// Deterministically safe pair used when synthesis exhausts its attempts
///
/// A repdigit (5-8) minus a repunit of the tier's digit length never borrows.
fn fallback_pair<R: Rng>(rng: &mut R, min: u32) -> (u32, u32) {
    let len = decimal_len(min);
    let safe_digit = rng.gen_range(5u8..=8);
    let num1 = from_digits_msb(&vec![safe_digit; len]);
    let num2 = from_digits_msb(&vec![1u8; len]);
    (num1.max(min), num2)
}
