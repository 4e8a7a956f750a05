//! The calculator state machine.
//!
//! [`reduce`] is a pure transition function: it reads the current
//! [`CalculatorState`] and one [`Intent`] and returns the next state. State is
//! never patched in place.

use super::{Operation, evaluate};
use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-progress two-operand expression.
///
/// All fields absent is the empty state, which is also the initial state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    /// Operand being typed. `None` means not started yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_operand: Option<String>,
    /// Left-hand side of the pending operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_operand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
}

impl CalculatorState {
    /// Whether this is the empty state.
    pub fn is_empty(&self) -> bool {
        self.current_operand.is_none()
            && self.previous_operand.is_none()
            && self.operation.is_none()
    }
}

/// A single keypad character: a decimal digit or `.`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Digit(char);

impl Digit {
    pub const POINT: Digit = Digit('.');

    pub fn new(c: char) -> Option<Self> {
        (c.is_ascii_digit() || c == '.').then_some(Self(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_point(self) -> bool {
        self.0 == '.'
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c).ok_or_else(|| CalcError::UnknownKey(c.to_string()))
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the user asked the calculator to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    AddDigit(Digit),
    Clear,
    DeleteDigit,
    ChooseOperation(Operation),
    Evaluate,
}

/// Compute the state that follows `state` after `intent`.
pub fn reduce(state: &CalculatorState, intent: &Intent) -> CalculatorState {
    let next = match *intent {
        Intent::AddDigit(digit) => add_digit(state, digit),
        Intent::Clear => CalculatorState::default(),
        Intent::DeleteDigit => delete_digit(state),
        Intent::ChooseOperation(operation) => choose_operation(state, operation),
        Intent::Evaluate => evaluate_pending(state),
    };

    tracing::debug!(?intent, ?next, "calculator transition");
    next
}

fn add_digit(state: &CalculatorState, digit: Digit) -> CalculatorState {
    let current = state.current_operand.as_deref();

    if digit.is_point() {
        match current {
            None => return with_current(state, "0.".to_string()),
            Some("-") => return with_current(state, "-0.".to_string()),
            Some(operand) if operand.contains('.') => return state.clone(),
            Some(_) => {}
        }
    }

    let mut operand = current.unwrap_or_default().to_string();
    operand.push(digit.as_char());
    with_current(state, operand)
}

fn delete_digit(state: &CalculatorState) -> CalculatorState {
    let Some(current) = state.current_operand.as_deref() else {
        return CalculatorState::default();
    };

    let mut operand = current.to_string();
    operand.pop();
    // An emptied operand stays `Some("")` rather than going back to `None`
    with_current(state, operand)
}

fn choose_operation(state: &CalculatorState, operation: Operation) -> CalculatorState {
    match (&state.previous_operand, &state.current_operand) {
        (None, None) => {
            if operation == Operation::Subtract {
                with_current(state, "-".to_string())
            } else {
                state.clone()
            }
        }
        (None, Some(current)) => CalculatorState {
            current_operand: None,
            previous_operand: Some(current.clone()),
            operation: Some(operation),
        },
        (Some(_), None) if state.operation.is_some() => CalculatorState {
            operation: Some(operation),
            ..state.clone()
        },
        _ => match resolve(state) {
            Ok(result) => CalculatorState {
                current_operand: None,
                previous_operand: Some(result),
                operation: Some(operation),
            },
            Err(_) => CalculatorState::default(),
        },
    }
}

fn evaluate_pending(state: &CalculatorState) -> CalculatorState {
    if state.operation.is_none()
        || state.previous_operand.is_none()
        || state.current_operand.is_none()
    {
        return state.clone();
    }

    match resolve(state) {
        Ok(result) => CalculatorState {
            current_operand: Some(result),
            previous_operand: None,
            operation: None,
        },
        Err(_) => CalculatorState::default(),
    }
}

/// Run the pending operation, logging the failure that forces a reset.
fn resolve(state: &CalculatorState) -> Result<String, CalcError> {
    evaluate(
        state.previous_operand.as_deref(),
        state.current_operand.as_deref(),
        state.operation,
    )
    .inspect_err(|err| {
        tracing::warn!(
            previous = ?state.previous_operand,
            current = ?state.current_operand,
            "{err}, resetting calculator"
        );
    })
}

fn with_current(state: &CalculatorState, operand: String) -> CalculatorState {
    CalculatorState {
        current_operand: Some(operand),
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(c: char) -> Intent {
        Intent::AddDigit(Digit::new(c).unwrap())
    }

    fn op(symbol: &str) -> Intent {
        Intent::ChooseOperation(Operation::from_symbol(symbol).unwrap())
    }

    fn run(intents: &[Intent]) -> CalculatorState {
        intents
            .iter()
            .fold(CalculatorState::default(), |state, intent| reduce(&state, intent))
    }

    fn state(
        previous: Option<&str>,
        symbol: Option<&str>,
        current: Option<&str>,
    ) -> CalculatorState {
        CalculatorState {
            current_operand: current.map(str::to_string),
            previous_operand: previous.map(str::to_string),
            operation: symbol.and_then(Operation::from_symbol),
        }
    }

    #[test]
    fn test_digits_append() {
        let s = run(&[digit('1'), digit('2'), digit('3')]);
        assert_eq!(s, state(None, None, Some("123")));
    }

    #[test]
    fn test_leading_zeros_are_kept_as_typed() {
        let s = run(&[digit('0'), digit('0'), digit('7')]);
        assert_eq!(s.current_operand.as_deref(), Some("007"));
    }

    #[test]
    fn test_decimal_point_guard() {
        let s = run(&[digit('.'), digit('.')]);
        assert_eq!(s.current_operand.as_deref(), Some("0."));

        let s = run(&[digit('1'), digit('.'), digit('5'), digit('.')]);
        assert_eq!(s.current_operand.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_negative_number_entry() {
        let s = run(&[op("-")]);
        assert_eq!(s, state(None, None, Some("-")));

        let s = run(&[op("-"), digit('5')]);
        assert_eq!(s.current_operand.as_deref(), Some("-5"));

        let s = run(&[op("-"), digit('.')]);
        assert_eq!(s.current_operand.as_deref(), Some("-0."));
    }

    #[test]
    fn test_other_operations_on_empty_are_ignored() {
        for symbol in ["+", "*", "/"] {
            assert!(run(&[op(symbol)]).is_empty());
        }
    }

    #[test]
    fn test_clear_resets() {
        let s = state(Some("5"), Some("+"), Some("3"));
        assert!(reduce(&s, &Intent::Clear).is_empty());
        let once = reduce(&s, &Intent::Clear);
        assert_eq!(reduce(&once, &Intent::Clear), once);
    }

    #[test]
    fn test_delete_floor_is_empty_string() {
        let s = state(None, None, Some("7"));
        let s = reduce(&s, &Intent::DeleteDigit);
        assert_eq!(s.current_operand.as_deref(), Some(""));
        let s = reduce(&s, &Intent::DeleteDigit);
        assert_eq!(s.current_operand.as_deref(), Some(""));
    }

    #[test]
    fn test_delete_without_current_resets() {
        let s = state(Some("5"), Some("+"), None);
        assert!(reduce(&s, &Intent::DeleteDigit).is_empty());
    }

    #[test]
    fn test_delete_then_point_appends() {
        let s = run(&[digit('7'), Intent::DeleteDigit, digit('.')]);
        assert_eq!(s.current_operand.as_deref(), Some("."));
    }

    #[test]
    fn test_delete_keeps_pending_operation() {
        let s = state(Some("5"), Some("+"), Some("12"));
        assert_eq!(
            reduce(&s, &Intent::DeleteDigit),
            state(Some("5"), Some("+"), Some("1"))
        );
    }

    #[test]
    fn test_choose_operation_commits_current() {
        let s = run(&[digit('5'), op("+")]);
        assert_eq!(s, state(Some("5"), Some("+"), None));
    }

    #[test]
    fn test_switching_operator() {
        let s = run(&[digit('5'), op("+"), op("*")]);
        assert_eq!(s, state(Some("5"), Some("*"), None));
    }

    #[test]
    fn test_chaining() {
        let s = state(Some("5"), Some("+"), Some("3"));
        assert_eq!(reduce(&s, &op("*")), state(Some("8"), Some("*"), None));

        let s = run(&[digit('2'), op("*"), digit('3'), op("-"), digit('1'), Intent::Evaluate]);
        assert_eq!(s, state(None, None, Some("5")));
    }

    #[test]
    fn test_evaluate() {
        let s = run(&[digit('9'), op("/"), digit('4'), Intent::Evaluate]);
        assert_eq!(s, state(None, None, Some("2.25")));
    }

    #[test]
    fn test_evaluate_incomplete_is_noop() {
        let incomplete = [
            state(None, None, Some("3")),
            state(Some("5"), Some("+"), None),
            CalculatorState::default(),
        ];
        for s in incomplete {
            assert_eq!(reduce(&s, &Intent::Evaluate), s);
        }
    }

    #[test]
    fn test_divide_by_zero_resets() {
        let s = state(Some("8"), Some("/"), Some("0"));
        assert!(reduce(&s, &Intent::Evaluate).is_empty());
        assert!(reduce(&s, &op("+")).is_empty());
    }

    #[test]
    fn test_unparseable_operand_propagates_empty_result() {
        let s = state(Some("5"), Some("+"), Some("-"));
        assert_eq!(reduce(&s, &Intent::Evaluate), state(None, None, Some("")));
        assert_eq!(reduce(&s, &op("*")), state(Some(""), Some("*"), None));
    }

    #[test]
    fn test_digits_after_result_append() {
        let s = run(&[digit('2'), op("+"), digit('2'), Intent::Evaluate, digit('1')]);
        assert_eq!(s.current_operand.as_deref(), Some("41"));
    }

    #[test]
    fn test_digit_validation() {
        assert!(Digit::new('x').is_none());
        assert!(Digit::new('-').is_none());
        assert_eq!(Digit::try_from('.'), Ok(Digit::POINT));
    }

    #[test]
    fn test_state_serialization() {
        let s = state(Some("5"), Some("+"), None);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"previousOperand":"5","operation":"+"}"#);
        assert_eq!(serde_json::to_string(&CalculatorState::default()).unwrap(), "{}");
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_intent_serialization() {
        let json = serde_json::to_string(&digit('7')).unwrap();
        assert_eq!(json, r#"{"type":"add_digit","payload":"7"}"#);
        let intent: Intent = serde_json::from_str(r#"{"type":"evaluate"}"#).unwrap();
        assert_eq!(intent, Intent::Evaluate);
        assert!(serde_json::from_str::<Intent>(r#"{"type":"add_digit","payload":"x"}"#).is_err());
    }
}
