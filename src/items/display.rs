//! Display read model for a calculator session.

use crate::calculator::{CalculatorState, Grouping, format_operand_with};
use std::fmt;

/// The two lines a calculator display shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayLines {
    /// Previous operand followed by the pending operation symbol.
    pub previous: String,
    /// The operand being typed, or the last result.
    pub current: String,
}

impl DisplayLines {
    /// Build the display for a state using the default grouping.
    pub fn from_state(state: &CalculatorState) -> Self {
        Self::from_state_with(state, &Grouping::default())
    }

    /// Build the display for a state.
    pub fn from_state_with(state: &CalculatorState, grouping: &Grouping) -> Self {
        let previous = [
            format_operand_with(state.previous_operand.as_deref(), grouping),
            state.operation.map(|op| op.symbol().to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        let current =
            format_operand_with(state.current_operand.as_deref(), grouping).unwrap_or_default();

        Self { previous, current }
    }

    /// Whether nothing is shown, as after a clear or a divide-by-zero reset.
    pub fn is_blank(&self) -> bool {
        self.previous.is_empty() && self.current.is_empty()
    }
}

impl fmt::Display for DisplayLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.previous)?;
        write!(f, "{}", self.current)
    }
}
