//! Operand formatting for display.
//!
//! Integer operands get thousands separators. Anything with a typed decimal
//! point is shown exactly as entered, so a trailing `.` or trailing zeros
//! stay visible while the user types.

/// Digit grouping used when formatting integer operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grouping {
    pub separator: String,
}

impl Default for Grouping {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
        }
    }
}

/// Format an operand with the default `,` separator.
pub fn format_operand(operand: Option<&str>) -> Option<String> {
    format_operand_with(operand, &Grouping::default())
}

/// Format an operand for display.
///
/// Returns `None` when there is nothing to display.
pub fn format_operand_with(operand: Option<&str>, grouping: &Grouping) -> Option<String> {
    let operand = operand?;

    if operand == "-" {
        return Some("-".to_string());
    }

    if operand.contains('.') {
        return Some(operand.to_string());
    }

    Some(format_integer(operand, &grouping.separator))
}

/// Group an integer string, keeping its sign and dropping leading zeros.
///
/// Exponent forms such as `1e+21` or `1e-7` are read as numbers and rounded
/// to a whole number first.
fn format_integer(integer: &str, separator: &str) -> String {
    let (sign, magnitude) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer.strip_prefix('+').unwrap_or(integer)),
    };

    if magnitude == "Infinity" {
        return format!("{sign}∞");
    }

    let digits = if magnitude.chars().all(|c| c.is_ascii_digit()) {
        magnitude.to_string()
    } else {
        match expand_exponent(magnitude) {
            Some(Expanded::Digits(digits)) => digits,
            Some(Expanded::Overflow) => return format!("{sign}∞"),
            None => return "NaN".to_string(),
        }
    };

    // An empty operand reads as zero
    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    format!("{sign}{}", group_digits(digits, separator))
}

enum Expanded {
    Digits(String),
    Overflow,
}

/// Expand `<digits>e<exponent>` into the digits of its nearest whole number,
/// rounding half away from zero.
fn expand_exponent(magnitude: &str) -> Option<Expanded> {
    let (mantissa, exponent) = magnitude.split_once(['e', 'E'])?;
    if mantissa.is_empty() || !mantissa.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let exponent: i64 = exponent.parse().ok()?;

    let mantissa = mantissa.trim_start_matches('0');
    if mantissa.is_empty() {
        return Some(Expanded::Digits("0".to_string()));
    }
    if magnitude.parse::<f64>().is_ok_and(f64::is_infinite) {
        return Some(Expanded::Overflow);
    }

    if exponent >= 0 {
        let zeros = "0".repeat(exponent as usize);
        return Some(Expanded::Digits(format!("{mantissa}{zeros}")));
    }

    // Number of mantissa digits left of the decimal point
    let split = mantissa.len() as i64 + exponent;
    let (whole, round_digit) = if split > 0 {
        let split = split as usize;
        (&mantissa[..split], mantissa.as_bytes()[split])
    } else if split == 0 {
        ("", mantissa.as_bytes()[0])
    } else {
        ("", b'0')
    };

    let whole = if round_digit >= b'5' {
        increment(whole)
    } else {
        whole.to_string()
    };
    Some(Expanded::Digits(whole))
}

/// Add one to a decimal digit string.
fn increment(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

fn group_digits(digits: &str, separator: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(operand: &str) -> String {
        format_operand(Some(operand)).unwrap()
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(fmt("1234"), "1,234");
        assert_eq!(fmt("1000000"), "1,000,000");
        assert_eq!(fmt("999"), "999");
        assert_eq!(fmt("-1234567"), "-1,234,567");
    }

    #[test]
    fn test_decimal_operands_are_verbatim() {
        assert_eq!(fmt("1234.5"), "1234.5");
        assert_eq!(fmt("0."), "0.");
        assert_eq!(fmt("-0."), "-0.");
        assert_eq!(fmt("1.50"), "1.50");
        assert_eq!(fmt("."), ".");
    }

    #[test]
    fn test_lone_minus_and_absent() {
        assert_eq!(fmt("-"), "-");
        assert_eq!(format_operand(None), None);
    }

    #[test]
    fn test_leading_zeros_and_empty() {
        assert_eq!(fmt("007"), "7");
        assert_eq!(fmt("0000"), "0");
        assert_eq!(fmt(""), "0");
        assert_eq!(fmt("-0"), "-0");
    }

    #[test]
    fn test_non_numeric_results() {
        assert_eq!(fmt("Infinity"), "∞");
        assert_eq!(fmt("-Infinity"), "-∞");
        assert_eq!(fmt("NaN"), "NaN");
    }

    #[test]
    fn test_exponent_results_read_as_numbers() {
        assert_eq!(fmt("1e-7"), "0");
        assert_eq!(fmt("1e-75"), "0");
        assert_eq!(fmt("-1e-7"), "-0");
        assert_eq!(fmt("1e+21"), "1,000,000,000,000,000,000,000");
        assert_eq!(fmt("1e+22"), "10,000,000,000,000,000,000,000");
        assert_eq!(fmt("25e-1"), "3");
        assert_eq!(fmt("995e-1"), "100");
        assert_eq!(fmt("5e-1"), "1");
        assert_eq!(fmt("0e+5"), "0");
        assert_eq!(fmt("1e+400"), "∞");
    }

    #[test]
    fn test_partial_exponent_is_nan() {
        assert_eq!(fmt("1e"), "NaN");
        assert_eq!(fmt("1e-"), "NaN");
        assert_eq!(fmt("e5"), "NaN");
    }

    #[test]
    fn test_custom_separator() {
        let grouping = Grouping {
            separator: " ".to_string(),
        };
        assert_eq!(
            format_operand_with(Some("1234567"), &grouping).as_deref(),
            Some("1 234 567")
        );
        assert_eq!(
            format_operand_with(Some("1234.5"), &grouping).as_deref(),
            Some("1234.5")
        );
    }
}
