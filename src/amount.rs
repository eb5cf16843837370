use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Longest leading decimal literal, the same prefix a lenient float reader accepts.
static DECIMAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").unwrap());

/// A numeric value pulled out of noisy report text.
///
/// `Unparseable` is an ordinary value, not an error: aggregation skips it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Amount {
    Parsed(f64),
    Unparseable,
}

impl Amount {
    pub fn value(self) -> Option<f64> {
        match self {
            Amount::Parsed(v) => Some(v),
            Amount::Unparseable => None,
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Amount::Unparseable
        } else {
            Amount::Parsed(value)
        }
    }
}

/// Parses an amount such as `"$1,234.56"` or `"USD 12,000"`.
///
/// Every character other than digits, `.` and `-` is dropped, then the
/// longest leading decimal literal is read. Anything left over is ignored,
/// so `"1.2.3"` reads as `1.2`.
pub fn parse_amount(input: &str) -> Amount {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let Some(prefix) = DECIMAL_PREFIX.find(&cleaned) else {
        return Amount::Unparseable;
    };

    prefix
        .as_str()
        .trim_end_matches('.')
        .parse::<f64>()
        .map(Amount::from)
        .unwrap_or(Amount::Unparseable)
}

/// Numbers pass through unchanged, strings go through [`parse_amount`],
/// anything else is unparseable.
pub fn parse_amount_value(value: &Value) -> Amount {
    match value {
        Value::Number(n) => n.as_f64().map(Amount::from).unwrap_or(Amount::Unparseable),
        Value::String(s) => parse_amount(s),
        _ => Amount::Unparseable,
    }
}

/// Formats a finite number as USD, e.g. `1234.5` -> `"$1,234.50"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_currency_text() {
        assert_eq!(parse_amount("$1,234.56"), Amount::Parsed(1234.56));
        assert_eq!(parse_amount("USD 12,000"), Amount::Parsed(12000.0));
        assert_eq!(parse_amount("-$250.10"), Amount::Parsed(-250.10));
        assert_eq!(parse_amount(" 45 "), Amount::Parsed(45.0));
    }

    #[test]
    fn test_parse_unparseable_text() {
        assert_eq!(parse_amount("abc"), Amount::Unparseable);
        assert_eq!(parse_amount(""), Amount::Unparseable);
        assert_eq!(parse_amount("-"), Amount::Unparseable);
        assert_eq!(parse_amount("."), Amount::Unparseable);
        assert_eq!(parse_amount("N/A"), Amount::Unparseable);
    }

    #[test]
    fn test_parse_reads_leading_literal_only() {
        assert_eq!(parse_amount("1.2.3"), Amount::Parsed(1.2));
        assert_eq!(parse_amount("10-12"), Amount::Parsed(10.0));
        assert_eq!(parse_amount("$5."), Amount::Parsed(5.0));
        assert_eq!(parse_amount("-.5"), Amount::Parsed(-0.5));
    }

    #[test]
    fn test_parse_value_passes_numbers_through() {
        assert_eq!(parse_amount_value(&json!(42)), Amount::Parsed(42.0));
        assert_eq!(parse_amount_value(&json!(1.5)), Amount::Parsed(1.5));
        assert_eq!(parse_amount_value(&json!("$7")), Amount::Parsed(7.0));
        assert_eq!(parse_amount_value(&json!(null)), Amount::Unparseable);
        assert_eq!(parse_amount_value(&json!([1])), Amount::Unparseable);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.0), "-$42.00");
        assert_eq!(format_currency(100.0), "$100.00");
    }
}
