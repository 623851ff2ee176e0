//! Elapsed-time decomposition for `uptime`-style strings.
//!
//! Handles the variants uptime tools print:
//!
//! ```text
//! 0 min
//! 3 mins
//! 3 days,  2:54
//! 2 days, 19:32
//! 1 day, 29 min
//! 16:59
//! ```
//!
//! When a string carries both a `min` phrase and an `H:MM` suffix, the
//! colon form wins for minutes.

use std::num::ParseIntError;

use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Errors from [`decompose_duration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The token a component is read from does not exist.
    #[error("missing duration token in '{0}'")]
    MissingToken(String),
    /// The token exists but is not an integer.
    #[error("invalid duration number '{token}' in '{input}': {source}")]
    InvalidNumber {
        input: String,
        token: String,
        #[source]
        source: ParseIntError,
    },
    /// The components do not fit in an `i64` count of seconds.
    #[error("duration '{0}' overflows the seconds total")]
    Overflow(String),
}

/// Day/hour/minute components of an elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub total_seconds: i64,
}

impl Duration {
    /// Builds a duration, or `None` when `total_seconds` would overflow.
    pub fn new(days: i64, hours: i64, minutes: i64) -> Option<Self> {
        let total_seconds = days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?)?;
        Some(Self {
            days,
            hours,
            minutes,
            total_seconds,
        })
    }
}

/// Decomposes an elapsed-time string.
///
/// # Errors
///
/// Returns [`DurationError`] when a token the grammar requires is missing or
/// not an integer, or when the total does not fit in `i64` seconds. No
/// component is silently replaced by zero.
///
/// # Examples
///
/// ```
/// use command_output_engine::duration::decompose_duration;
///
/// let d = decompose_duration("3 days,  2:54").unwrap();
/// assert_eq!((d.days, d.hours, d.minutes), (3, 2, 54));
/// assert_eq!(d.total_seconds, 269_640);
///
/// assert!(decompose_duration("x min").is_err());
/// ```
pub fn decompose_duration(input: &str) -> Result<Duration, DurationError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut days = 0;
    let mut hours = 0;
    let mut minutes = 0;

    if input.contains("min") {
        let token = tokens
            .len()
            .checked_sub(2)
            .and_then(|idx| tokens.get(idx))
            .ok_or_else(|| DurationError::MissingToken(input.to_string()))?;
        minutes = parse_component(input, token)?;
    }

    if input.contains(':') {
        let clock = tokens
            .last()
            .ok_or_else(|| DurationError::MissingToken(input.to_string()))?;
        let parts: Vec<&str> = clock.split(':').collect();
        let hour_token = parts
            .len()
            .checked_sub(2)
            .and_then(|idx| parts.get(idx))
            .ok_or_else(|| DurationError::MissingToken(input.to_string()))?;
        hours = parse_component(input, hour_token)?;

        let minute_token = input.rsplit(':').next().unwrap_or_default();
        minutes = parse_component(input, minute_token)?;
    }

    if input.contains("day") {
        let token = tokens
            .first()
            .ok_or_else(|| DurationError::MissingToken(input.to_string()))?;
        days = parse_component(input, token)?;
    }

    Duration::new(days, hours, minutes)
        .ok_or_else(|| DurationError::Overflow(input.to_string()))
}

fn parse_component(input: &str, token: &str) -> Result<i64, DurationError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|source| DurationError::InvalidNumber {
            input: input.to_string(),
            token: token.trim().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_variants() {
        let cases = [
            ("0 min", (0, 0, 0, 0)),
            ("3 mins", (0, 0, 3, 180)),
            ("3 days,  2:54", (3, 2, 54, 269_640)),
            ("2 days, 19:32", (2, 19, 32, 243_120)),
            ("1 day, 29 min", (1, 0, 29, 88_140)),
            ("16:59", (0, 16, 59, 61_140)),
            ("3 days, 4:03", (3, 4, 3, 273_780)),
        ];

        for (input, (days, hours, minutes, total)) in cases {
            let d = decompose_duration(input).unwrap();
            assert_eq!(
                (d.days, d.hours, d.minutes, d.total_seconds),
                (days, hours, minutes, total),
                "case {input:?}"
            );
        }
    }

    #[test]
    fn test_total_matches_components() {
        for input in ["0 min", "12 mins", "5 days, 23:59", "1 day, 1 min", "0:00"] {
            let d = decompose_duration(input).unwrap();
            assert_eq!(
                d.total_seconds,
                d.days * 86_400 + d.hours * 3_600 + d.minutes * 60
            );
        }
    }

    #[test]
    fn test_colon_overrides_min_phrase() {
        // Both forms present: the colon suffix decides the minutes.
        let d = decompose_duration("mins 7 1:05").unwrap();
        assert_eq!((d.hours, d.minutes), (1, 5));
    }

    #[test]
    fn test_malformed_tokens_are_errors() {
        assert!(matches!(
            decompose_duration("min"),
            Err(DurationError::MissingToken(_))
        ));
        assert!(matches!(
            decompose_duration("many days"),
            Err(DurationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            decompose_duration("up:now"),
            Err(DurationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_oversized_counts_are_overflow_errors() {
        for input in ["200000000000000 days, 1:00", "9223372036854775807 mins"] {
            assert_eq!(
                decompose_duration(input),
                Err(DurationError::Overflow(input.to_string())),
                "case {input:?}"
            );
        }
        assert!(Duration::new(0, i64::MAX / 3_600 + 1, 0).is_none());
    }

    #[test]
    fn test_plain_text_without_markers_is_zero() {
        assert_eq!(decompose_duration("").unwrap(), Duration::default());
    }
}
