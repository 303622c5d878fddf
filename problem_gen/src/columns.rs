//! Column decomposition
//!
//! Turns an operand pair into the ordered column model, index 0 the
//! least-significant digit. Addition and multiplication thread a running
//! carry; subtraction's answer row is the digit decomposition of the
//! difference with no carry chain; short division is computed
//! most-significant first and then reversed into the shared storage order.

use problem_types::{MathColumn, Operation};

use crate::digits::{digits_lsb, digits_msb};

/// Decomposes `num1 (op) num2` into ordered columns
pub fn decompose(num1: u32, num2: u32, operation: Operation) -> Vec<MathColumn> {
    match operation {
        Operation::Divide => decompose_division(num1, num2),
        _ => decompose_vertical(num1, num2, operation),
    }
}

fn decompose_vertical(num1: u32, num2: u32, operation: Operation) -> Vec<MathColumn> {
    let result = match operation {
        Operation::Add => num1 + num2,
        Operation::Subtract => num1 - num2,
        Operation::Multiply => num1 * num2,
        Operation::Divide => unreachable!("division decomposes separately"),
    };

    let top = digits_lsb(num1);
    let bottom = digits_lsb(num2);
    let answer = digits_lsb(result);
    let total = top.len().max(bottom.len()).max(answer.len());

    let mut columns = Vec::with_capacity(total);
    let mut carry: u8 = 0;
    for i in 0..total {
        let digit1 = top.get(i).copied();
        // Multiply carries a scalar multiplier on the problem, not a digit row
        let digit2 = if operation.scalar_operand() {
            None
        } else {
            bottom.get(i).copied()
        };

        let mut sum_digit = answer.get(i).copied().unwrap_or(0);
        let mut carry_in = 0;
        let mut carry_out = 0;
        match operation {
            Operation::Add => {
                carry_in = carry;
                let sum = digit1.unwrap_or(0) + digit2.unwrap_or(0) + carry;
                carry_out = sum / 10;
            }
            Operation::Multiply => {
                carry_in = carry;
                let product = u32::from(digit1.unwrap_or(0)) * num2 + u32::from(carry);
                sum_digit = (product % 10) as u8;
                carry_out = (product / 10) as u8;
            }
            Operation::Subtract => {
                // Answer digits come from the difference; borrow-need is
                // derived later, per column, from digit1 vs digit2.
            }
            Operation::Divide => unreachable!(),
        }

        columns.push(MathColumn {
            digit1,
            digit2,
            correct_sum_digit: sum_digit,
            correct_carry_in: carry_in,
            correct_carry_out: carry_out,
        });
        carry = carry_out;
    }

    columns
}

/// Classic short division: computed high to low, stored low to high
fn decompose_division(dividend: u32, divisor: u32) -> Vec<MathColumn> {
    let digits = digits_msb(dividend);
    let mut columns = Vec::with_capacity(digits.len());
    let mut remainder: u32 = 0;

    for &d in &digits {
        let value = remainder * 10 + u32::from(d);
        let quotient_digit = value / divisor;
        let next_remainder = value % divisor;
        columns.push(MathColumn {
            digit1: Some(d),
            digit2: None,
            correct_sum_digit: quotient_digit as u8,
            correct_carry_in: remainder as u8,
            correct_carry_out: next_remainder as u8,
        });
        remainder = next_remainder;
    }

    columns.reverse();
    columns
}
