//! Binary operations the calculator can hold pending.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A pending binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations in keypad order.
    pub const ALL: [Operation; 4] = [Self::Divide, Self::Multiply, Self::Add, Self::Subtract];

    /// The symbol shown next to the previous operand.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Parse an operator symbol. Accepts the keypad glyphs `×` and `÷` too.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "*" | "×" => Some(Self::Multiply),
            "/" | "÷" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operation, `previous` on the left.
    pub(crate) fn apply(self, previous: f64, current: f64) -> f64 {
        match self {
            Self::Add => previous + current,
            Self::Subtract => previous - current,
            Self::Multiply => previous * current,
            Self::Divide => previous / current,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Self::from_symbol(&symbol)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown operation {symbol:?}")))
    }
}
