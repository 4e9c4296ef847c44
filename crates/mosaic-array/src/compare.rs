//! Loose and strict value equality.
//!
//! [`strict_eq`] requires the same type and the same value. [`loose_eq`]
//! applies a fixed set of coercions:
//!
//! | Left | Right | Rule |
//! |------|-------|------|
//! | Null | Null | equal |
//! | Null | String | equal iff the string is empty |
//! | Bool or Null | anything else | compare truthiness |
//! | Int/Float | Int/Float | numeric |
//! | Int/Float | String | numeric if the string is numeric, else string form vs string |
//! | String | String | numeric if both are numeric, else byte equality |
//! | Array | Array | same keys, loosely equal values, order ignored |
//! | Array | scalar | never equal |
//!
//! A numeric string is an optionally signed decimal literal (digits, optional
//! fraction, optional exponent), optionally surrounded by ASCII whitespace.

use std::cmp::Ordering;
use std::fmt;

use crate::value::{Array, Number, Value};

/// Comparison mode used when matching values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Equality {
    /// Coercive comparison (see [`loose_eq`]).
    #[default]
    Loose,
    /// Same type and same value (see [`strict_eq`]).
    Strict,
}

impl Equality {
    /// Returns `true` for [`Equality::Strict`].
    pub fn is_strict(self) -> bool {
        matches!(self, Equality::Strict)
    }

    /// Compares two values under this mode.
    pub fn equal(self, a: &Value, b: &Value) -> bool {
        match self {
            Equality::Loose => loose_eq(a, b),
            Equality::Strict => strict_eq(a, b),
        }
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Equality::Loose => "loose",
            Equality::Strict => "strict",
        }
    }
}

impl From<bool> for Equality {
    /// `true` selects strict comparison.
    fn from(strict: bool) -> Self {
        if strict {
            Equality::Strict
        } else {
            Equality::Loose
        }
    }
}

impl fmt::Display for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coercive equality.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
            a.is_truthy() == b.is_truthy()
        }

        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => numbers_equal(x, y),
                _ => false,
            }
        }

        (Value::Int(_) | Value::Float(_), Value::String(s)) => number_eq_string(a, s),
        (Value::String(s), Value::Int(_) | Value::Float(_)) => number_eq_string(b, s),

        (Value::String(x), Value::String(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(x), Some(y)) => numbers_equal(x, y),
            _ => x == y,
        },

        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, v)| y.get(key).is_some_and(|w| loose_eq(v, w)))
        }

        // Array against a scalar
        _ => false,
    }
}

/// Same-type equality. Arrays must hold the same pairs in the same order.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => strict_eq_arrays(x, y),
        _ => false,
    }
}

/// Order-sensitive array identity: same keys in the same order, strictly
/// equal values.
pub fn strict_eq_arrays(a: &Array, b: &Array) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && strict_eq(va, vb))
}

/// Returns `true` if any value of `haystack` equals `needle` under `mode`.
pub fn contains_value(haystack: &Array, needle: &Value, mode: Equality) -> bool {
    haystack.values().any(|candidate| mode.equal(needle, candidate))
}

/// Parses a numeric string.
///
/// Integer literals that fit in `i64` give [`Number::I64`]; everything else
/// numeric gives [`Number::F64`]. Returns `None` for non-numeric strings,
/// including `inf` and `nan`.
pub fn parse_numeric(s: &str) -> Option<Number> {
    let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let body = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);

    if !is_decimal_literal(body) {
        return None;
    }

    let integral = body.bytes().all(|b| b.is_ascii_digit());
    if integral {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Number::I64(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::F64)
}

fn is_decimal_literal(body: &str) -> bool {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (mantissa, exponent) = match body.split_once(|c: char| c == 'e' || c == 'E') {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

fn numbers_equal(a: Number, b: Number) -> bool {
    a.compare(b) == Some(Ordering::Equal)
}

fn number_eq_string(number: &Value, s: &str) -> bool {
    match (number.as_number(), parse_numeric(s)) {
        (Some(n), Some(parsed)) => numbers_equal(n, parsed),
        _ => number.to_string_form() == s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use crate::value::list_from;

    fn s(v: &str) -> Value {
        Value::from(v)
    }

    #[test]
    fn equality_mode_basics() {
        assert_eq!(Equality::default(), Equality::Loose);
        assert_eq!(Equality::from(true), Equality::Strict);
        assert_eq!(Equality::from(false), Equality::Loose);
        assert!(Equality::Strict.is_strict());
        assert_eq!(Equality::Strict.to_string(), "strict");
        assert_eq!(Equality::Loose.to_string(), "loose");
    }

    #[test]
    fn numeric_string_parsing() {
        assert_eq!(parse_numeric("42"), Some(Number::I64(42)));
        assert_eq!(parse_numeric("-7"), Some(Number::I64(-7)));
        assert_eq!(parse_numeric("+3"), Some(Number::I64(3)));
        assert_eq!(parse_numeric(" 12 "), Some(Number::I64(12)));
        assert_eq!(parse_numeric("1.5"), Some(Number::F64(1.5)));
        assert_eq!(parse_numeric(".5"), Some(Number::F64(0.5)));
        assert_eq!(parse_numeric("1."), Some(Number::F64(1.0)));
        assert_eq!(parse_numeric("1e3"), Some(Number::F64(1000.0)));
        assert_eq!(parse_numeric("2E-1"), Some(Number::F64(0.2)));
        assert_eq!(
            parse_numeric("99999999999999999999"),
            Some(Number::F64(1e20))
        );

        for input in ["", " ", ".", "-", "abc", "1a", "1e", "1.2.3", "inf", "NaN", "0x1A", "1 2"] {
            assert_eq!(parse_numeric(input), None, "input {input:?}");
        }
    }

    #[test]
    fn loose_scalars() {
        assert!(loose_eq(&Value::Int(3), &s("3")));
        assert!(loose_eq(&s("3"), &Value::Int(3)));
        assert!(loose_eq(&Value::Int(1), &Value::Float(1.0)));
        assert!(loose_eq(&s("1e3"), &s("1000")));
        assert!(loose_eq(&s("10"), &s("010")));
        assert!(loose_eq(&Value::Int(10), &s(" 10")));
        assert!(!loose_eq(&s("abc"), &s("ABC")));
        assert!(!loose_eq(&Value::Int(0), &s("a")));
        assert!(!loose_eq(&Value::Int(1), &s("1abc")));
        assert!(loose_eq(&Value::Float(1.5), &s("1.5")));
        assert!(loose_eq(&Value::Float(f64::INFINITY), &s("INF")));
    }

    #[test]
    fn loose_null_and_bool() {
        assert!(loose_eq(&Value::Null, &Value::Null));
        assert!(loose_eq(&Value::Null, &s("")));
        assert!(!loose_eq(&Value::Null, &s("0")));
        assert!(loose_eq(&Value::Null, &Value::Int(0)));
        assert!(loose_eq(&Value::Null, &Value::Bool(false)));
        assert!(loose_eq(&Value::Null, &Value::Array(Array::new())));
        assert!(loose_eq(&Value::Bool(true), &s("yes")));
        assert!(loose_eq(&Value::Bool(false), &s("0")));
        assert!(loose_eq(&Value::Bool(true), &Value::from(vec![0])));
        assert!(!loose_eq(&Value::Bool(true), &Value::Int(0)));
    }

    #[test]
    fn loose_arrays_ignore_order_and_coerce_values() {
        let a = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let b = Value::from(vec![s("1"), s("2"), s("3")]);
        assert!(loose_eq(&a, &b));

        let mut x = Array::new();
        x.insert(Key::from("a"), Value::Int(1));
        x.insert(Key::from("b"), Value::Int(2));
        let mut y = Array::new();
        y.insert(Key::from("b"), Value::Int(2));
        y.insert(Key::from("a"), Value::Int(1));
        assert!(loose_eq(&Value::Array(x), &Value::Array(y)));

        let shorter = Value::from(vec![1, 2]);
        assert!(!loose_eq(&a, &shorter));
        assert!(!loose_eq(&a, &s("Array")));
        assert!(!loose_eq(&a, &Value::Int(1)));
    }

    #[test]
    fn strict_requires_same_type() {
        assert!(strict_eq(&Value::Int(3), &Value::Int(3)));
        assert!(!strict_eq(&Value::Int(3), &s("3")));
        assert!(!strict_eq(&Value::Int(1), &Value::Float(1.0)));
        assert!(!strict_eq(&Value::Null, &Value::Bool(false)));
        assert!(strict_eq(&Value::Null, &Value::Null));
        assert!(!strict_eq(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
    }

    #[test]
    fn strict_arrays_are_order_sensitive() {
        let a = list_from([1, 2, 3]);
        let b = list_from([1, 2, 3]);
        assert!(strict_eq_arrays(&a, &b));

        let mut reordered = Array::new();
        reordered.insert(Key::int(1), Value::Int(2));
        reordered.insert(Key::int(0), Value::Int(1));
        reordered.insert(Key::int(2), Value::Int(3));
        assert!(!strict_eq_arrays(&a, &reordered));
        assert!(loose_eq(&Value::Array(a.clone()), &Value::Array(reordered)));

        let strings = list_from(["1", "2", "3"]);
        assert!(!strict_eq_arrays(&a, &strings));
    }

    #[test]
    fn contains_value_respects_mode() {
        let haystack = list_from([s("3"), s("x")]);
        assert!(contains_value(&haystack, &Value::Int(3), Equality::Loose));
        assert!(!contains_value(&haystack, &Value::Int(3), Equality::Strict));
        assert!(contains_value(&haystack, &s("x"), Equality::Strict));
        assert!(!contains_value(&Array::new(), &Value::Null, Equality::Loose));
    }
}
