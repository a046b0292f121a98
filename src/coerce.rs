use nom::{
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
    IResult,
};
use serde_json::Value;

/// Read a cell as a number, treating anything unreadable as 0.0.
///
/// Strings are read by their leading numeric prefix ("12.5kg" -> 12.5,
/// " 7" -> 7.0, "abc" -> 0.0). The result is always finite.
pub fn coerce_numeric(cell: &Value) -> f64 {
    let parsed = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Largest of the coerced values, or 0.0 for an empty iterator
pub fn max_of<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().reduce(f64::max).unwrap_or(0.0)
}

/// Longest leading float literal: sign, digits with optional fraction, optional exponent.
///
/// An exponent marker without digits ("4e") is left unconsumed.
fn float_prefix(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let (_, text) = float_prefix(s.trim_start()).ok()?;
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_numeric(&json!(42)), 42.0);
        assert_eq!(coerce_numeric(&json!(-3.5)), -3.5);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(coerce_numeric(&json!("12.5")), 12.5);
        assert_eq!(coerce_numeric(&json!("  7")), 7.0);
        assert_eq!(coerce_numeric(&json!("-.5")), -0.5);
        assert_eq!(coerce_numeric(&json!("3.")), 3.0);
        assert_eq!(coerce_numeric(&json!("1e3")), 1000.0);
    }

    #[test]
    fn test_leading_prefix_wins() {
        assert_eq!(coerce_numeric(&json!("12kg")), 12.0);
        assert_eq!(coerce_numeric(&json!("4e")), 4.0);
        assert_eq!(coerce_numeric(&json!("1.2.3")), 1.2);
        assert_eq!(coerce_numeric(&json!("+5")), 5.0);
        assert_eq!(coerce_numeric(&json!("1e+2x")), 100.0);
        assert_eq!(coerce_numeric(&json!(".5e-1")), 0.05);
        assert_eq!(coerce_numeric(&json!("12,5")), 12.0);
    }

    #[test]
    fn test_float_prefix_stops_at_literal_end() {
        assert_eq!(float_prefix("3.5e2kg"), Ok(("kg", "3.5e2")));
        assert_eq!(float_prefix("-7e-"), Ok(("e-", "-7")));
        assert!(float_prefix("e5").is_err());
    }

    #[test]
    fn test_unreadable_is_zero() {
        assert_eq!(coerce_numeric(&json!("abc")), 0.0);
        assert_eq!(coerce_numeric(&json!("")), 0.0);
        assert_eq!(coerce_numeric(&json!(".")), 0.0);
        assert_eq!(coerce_numeric(&json!("-")), 0.0);
        assert_eq!(coerce_numeric(&json!("inf")), 0.0);
        assert_eq!(coerce_numeric(&json!("Infinity")), 0.0);
        assert_eq!(coerce_numeric(&json!("1e999")), 0.0);
        assert_eq!(coerce_numeric(&json!(null)), 0.0);
        assert_eq!(coerce_numeric(&json!(true)), 0.0);
    }

    #[test]
    fn test_max_of() {
        assert_eq!(max_of(vec![1.0, 5.0, 3.0]), 5.0);
        assert_eq!(max_of(vec![-4.0, -2.0]), -2.0);
        assert_eq!(max_of(Vec::new()), 0.0);
    }
}
