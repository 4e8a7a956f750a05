//! Calculator core.
//!
//! This module provides:
//! - The intent reducer that drives a two-operand calculator
//! - Evaluation of a pending operation against two operand strings
//! - Display formatting for operands
//! - Parsing of keypad labels into intents

mod evaluation;
mod format;
mod keys;
mod operation;
mod state;

pub use evaluation::{evaluate, parse_operand};
pub use format::{Grouping, format_operand, format_operand_with};
pub use keys::{looks_like_key, parse_key, parse_keys};
pub use operation::Operation;
pub use state::{CalculatorState, Digit, Intent, reduce};
