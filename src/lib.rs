//! A two-operand button calculator.
//!
//! The core is a pure reducer over [`calculator::Intent`]s. Operands are kept
//! as the text the user typed and only parsed when an operation is resolved.

pub mod calculator;
pub mod config;
pub mod error;
pub mod items;
pub mod session;

pub use calculator::{CalculatorState, Digit, Intent, Operation};
pub use config::Config;
pub use error::{CalcError, ConfigError};
pub use items::DisplayLines;
pub use session::{Session, SessionId, SessionRegistry};
