//! Typed-value coercion.
//!
//! Coercion failure is an expected outcome, not an error: the functions here
//! return [`Coerced::Unparseable`] and leave the fallback to the caller.

use command_output_core::Value;

/// Outcome of coercing a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    Value(T),
    Unparseable,
}

impl<T> Coerced<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unparseable => None,
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable)
    }
}

impl From<Coerced<i64>> for Value {
    fn from(coerced: Coerced<i64>) -> Self {
        coerced.ok().map_or(Value::Null, Value::Integer)
    }
}

impl From<Coerced<f64>> for Value {
    fn from(coerced: Coerced<f64>) -> Self {
        coerced.ok().map_or(Value::Null, Value::Float)
    }
}

/// Parses a whitespace-padded integer.
///
/// # Examples
///
/// ```
/// use command_output_engine::coerce::{Coerced, coerce_int};
///
/// assert_eq!(coerce_int(" 42 "), Coerced::Value(42));
/// assert_eq!(coerce_int("4.2"), Coerced::Unparseable);
/// ```
pub fn coerce_int(s: &str) -> Coerced<i64> {
    match s.trim().parse::<i64>() {
        Ok(n) => Coerced::Value(n),
        Err(_) => Coerced::Unparseable,
    }
}

/// Parses a whitespace-padded decimal number.
///
/// Only `.` is accepted as decimal separator. `inf` and `nan` are reported
/// unparseable since records cannot carry non-finite numbers.
pub fn coerce_float(s: &str) -> Coerced<f64> {
    match s.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Coerced::Value(n),
        _ => Coerced::Unparseable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int_is_idempotent() {
        let first = coerce_int("1160660");
        let second = coerce_int("1160660");
        assert_eq!(first, Coerced::Value(1160660));
        assert_eq!(first, second);

        let again = coerce_int(&first.ok().unwrap().to_string());
        assert_eq!(again, first);
    }

    #[test]
    fn test_non_numeric_strings_are_unparseable() {
        for s in ["", "   ", "abc", "1,5", "12abc", "(none)", "N/A", "nan", "inf"] {
            assert!(coerce_int(s).is_unparseable(), "int accepted {s:?}");
            assert!(coerce_float(s).is_unparseable(), "float accepted {s:?}");
        }
    }

    #[test]
    fn test_coerce_float_accepts_padding_and_integers() {
        assert_eq!(coerce_float(" 1.88 "), Coerced::Value(1.88));
        assert_eq!(coerce_float("2"), Coerced::Value(2.0));
        assert_eq!(coerce_float("-0.5"), Coerced::Value(-0.5));
    }

    #[test]
    fn test_coerced_into_value() {
        assert_eq!(Value::from(coerce_int("7")), Value::Integer(7));
        assert_eq!(Value::from(coerce_int("x")), Value::Null);
        assert_eq!(Value::from(coerce_float("x")), Value::Null);
    }
}
