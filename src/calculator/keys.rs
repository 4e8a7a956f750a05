//! Keypad label parsing.
//!
//! Maps the labels printed on calculator buttons to intents, so a button
//! sequence like `12 + 3 =` can be replayed against a session.

use super::{Digit, Intent, Operation};
use crate::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches any label the keypad knows about.
    static ref KEY_LABEL: Regex = Regex::new(
        r"(?i)^(?:[\d.]+|[+\-*/×÷−]|=|ac|c|del|⌫)$"
    ).unwrap();
}

/// Fast check whether a label names a keypad button.
pub fn looks_like_key(label: &str) -> bool {
    KEY_LABEL.is_match(label.trim())
}

/// Translate one button label into the intents it produces.
///
/// A run of digits such as `120` presses each digit in turn.
pub fn parse_key(label: &str) -> Result<Vec<Intent>, CalcError> {
    let trimmed = label.trim();
    if !looks_like_key(trimmed) {
        return Err(CalcError::UnknownKey(label.to_string()));
    }

    if let Some(operation) = Operation::from_symbol(trimmed) {
        return Ok(vec![Intent::ChooseOperation(operation)]);
    }

    let intent = match trimmed.to_ascii_lowercase().as_str() {
        "=" => Intent::Evaluate,
        "ac" | "c" => Intent::Clear,
        "del" | "⌫" => Intent::DeleteDigit,
        digits => {
            return digits
                .chars()
                .map(|c| Digit::try_from(c).map(Intent::AddDigit))
                .collect();
        }
    };

    Ok(vec![intent])
}

/// Translate a sequence of labels, stopping at the first unknown one.
pub fn parse_keys<I, S>(labels: I) -> Result<Vec<Intent>, CalcError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut intents = Vec::new();
    for label in labels {
        intents.extend(parse_key(label.as_ref())?);
    }
    Ok(intents)
}
