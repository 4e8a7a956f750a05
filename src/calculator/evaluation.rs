//! Operand evaluation.
//!
//! Resolves a pending operation against two operand strings and renders
//! the result back to text. Operands stay opaque text until this point.

use super::Operation;
use crate::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest numeric prefix of an operand: optional sign, then either
    /// `Infinity` or a decimal with an optional exponent.
    static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)"
    ).unwrap();
}

/// Evaluate `previous <operation> current`.
///
/// Returns `Ok("")` when either operand is not a number or no operation is
/// pending. Fails only with [`CalcError::DivideByZero`], when dividing by a
/// current operand equal to zero.
pub fn evaluate(
    previous: Option<&str>,
    current: Option<&str>,
    operation: Option<Operation>,
) -> Result<String, CalcError> {
    let previous = parse_operand(previous);
    let current = parse_operand(current);
    if previous.is_nan() || current.is_nan() {
        return Ok(String::new());
    }

    let Some(operation) = operation else {
        return Ok(String::new());
    };

    if operation == Operation::Divide && current == 0.0 {
        return Err(CalcError::DivideByZero);
    }

    Ok(stringify(operation.apply(previous, current)))
}

/// Parse the numeric prefix of an operand, NaN when there is none.
pub fn parse_operand(operand: Option<&str>) -> f64 {
    let Some(operand) = operand else {
        return f64::NAN;
    };

    NUMERIC_PREFIX
        .find(operand.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Render a value the way it is stored back into an operand.
fn stringify(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // -0 renders without its sign
        "0".to_string()
    } else if value.is_sign_negative() {
        format!("-{}", finite_to_string(-value))
    } else {
        finite_to_string(value)
    }
}

/// Shortest round-trip digits, switching to exponent notation below 1e-6
/// and from 1e21 upwards.
fn finite_to_string(value: f64) -> String {
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if exponent >= 0 { '+' } else { '-' };
        let exponent = exponent.unsigned_abs();
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{exponent}")
        } else {
            format!("{lead}.{rest}e{sign}{exponent}")
        }
    }
}
