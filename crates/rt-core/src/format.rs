//! Display formatting for times: seconds with two fixed decimals.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::Millis;

/// Pre-compiled pattern for `S.ff` seconds strings.
static SECONDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-)?(\d+)(?:\.(\d{1,3}))?$").unwrap());

/// Errors from parsing a formatted time back to milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    /// The string is not of the form `S`, `S.f`, `S.ff` or `S.fff`.
    #[error("invalid time: {0:?}, expected seconds like 12.34")]
    Invalid(String),
    /// The value does not fit in milliseconds.
    #[error("time out of range: {0}")]
    OutOfRange(String),
}

/// Formats milliseconds as seconds with two decimals, rounding half away
/// from zero.
#[allow(clippy::cast_possible_truncation)]
fn fixed_seconds(ms: f64) -> String {
    let centis = (ms / 10.0).round() as i64;
    let sign = if centis < 0 { "-" } else { "" };
    let abs = centis.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Formats the time from `previous` to `current`.
///
/// A missing `previous` means no time has passed. Any delta below one
/// millisecond, including every negative delta, formats as `0.00`.
pub fn format_delta(current: f64, previous: Option<f64>) -> String {
    let delta = current - previous.unwrap_or(current);
    if delta < 1.0 {
        return fixed_seconds(0.0);
    }
    fixed_seconds(delta)
}

/// Formats a duration or instant given in milliseconds. Negative values keep
/// their sign.
pub fn format_absolute(time_ms: f64) -> String {
    fixed_seconds(time_ms)
}

/// Integer-millisecond convenience for [`format_delta`].
#[allow(clippy::cast_precision_loss)]
pub fn format_delta_ms(current: Millis, previous: Option<Millis>) -> String {
    format_delta(current as f64, previous.map(|p| p as f64))
}

/// Integer-millisecond convenience for [`format_absolute`].
#[allow(clippy::cast_precision_loss)]
pub fn format_absolute_ms(time_ms: Millis) -> String {
    format_absolute(time_ms as f64)
}

/// Parses a seconds string such as `12.34` back to milliseconds.
pub fn parse_seconds(s: &str) -> Result<Millis, ParseTimeError> {
    let s = s.trim();
    let Some(caps) = SECONDS_RE.captures(s) else {
        return Err(ParseTimeError::Invalid(s.to_string()));
    };

    let seconds: Millis = caps[2]
        .parse()
        .map_err(|_| ParseTimeError::OutOfRange(s.to_string()))?;
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    // Right-pad to three digits: "5" is 500ms, "05" is 50ms.
    let fraction_ms: Millis = format!("{fraction:0<3}")
        .parse()
        .map_err(|_| ParseTimeError::Invalid(s.to_string()))?;

    let ms = seconds
        .checked_mul(1_000)
        .and_then(|ms| ms.checked_add(fraction_ms))
        .ok_or_else(|| ParseTimeError::OutOfRange(s.to_string()))?;

    Ok(if caps.get(1).is_some() { -ms } else { ms })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_examples() {
        assert_eq!(format_delta(1500.0, Some(1000.0)), "0.50");
        assert_eq!(format_delta(1000.0, Some(1000.0)), "0.00");
        assert_eq!(format_delta(1000.0, None), "0.00");
    }

    #[test]
    fn delta_boundary_below_one_millisecond() {
        assert_eq!(format_delta(0.0, Some(0.0)), "0.00");
        assert_eq!(format_delta(0.999, Some(0.0)), "0.00");
        // 1ms is past the zero shortcut but still rounds to 0.00s.
        assert_eq!(format_delta(1.0, Some(0.0)), "0.00");
        assert_eq!(format_delta(5.0, Some(0.0)), "0.01");
    }

    #[test]
    fn negative_deltas_format_as_zero() {
        assert_eq!(format_delta(999.0, Some(1000.0)), "0.00");
        assert_eq!(format_delta(0.0, Some(5000.0)), "0.00");
    }

    #[test]
    fn absolute_rounds_half_away_from_zero() {
        assert_eq!(format_absolute(20_133.7), "20.13");
        assert_eq!(format_absolute(125.0), "0.13");
        assert_eq!(format_absolute(-125.0), "-0.13");
        assert_eq!(format_absolute(-1500.0), "-1.50");
        assert_eq!(format_absolute(-3.0), "0.00");
        assert_eq!(format_absolute(3_723_450.0), "3723.45");
    }

    #[test]
    fn integer_helpers_match_float_versions() {
        assert_eq!(format_delta_ms(1_500, Some(1_000)), "0.50");
        assert_eq!(format_delta_ms(1_000, None), "0.00");
        assert_eq!(format_absolute_ms(61_005), "61.01");
    }

    #[test]
    fn parse_seconds_accepts_fixed_formats() {
        assert_eq!(parse_seconds("0.50"), Ok(500));
        assert_eq!(parse_seconds("12"), Ok(12_000));
        assert_eq!(parse_seconds("1.5"), Ok(1_500));
        assert_eq!(parse_seconds("1.005"), Ok(1_005));
        assert_eq!(parse_seconds("-1.50"), Ok(-1_500));
        assert_eq!(parse_seconds(" 3.25 "), Ok(3_250));
    }

    #[test]
    fn parse_seconds_rejects_garbage() {
        for input in ["", "abc", "1.2345", "1,50", "--1", "1."] {
            assert!(
                matches!(parse_seconds(input), Err(ParseTimeError::Invalid(_))),
                "{input:?} should be invalid"
            );
        }
        assert!(matches!(
            parse_seconds("99999999999999999999"),
            Err(ParseTimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn format_then_parse_is_within_rounding_tolerance() {
        for ms in [0, 1, 4, 5, 9, 125, 999, 1_000, 1_234, 59_995, 3_600_004, -1_505] {
            let parsed = parse_seconds(&format_absolute_ms(ms)).unwrap();
            assert!((parsed - ms).abs() <= 5, "{ms} came back as {parsed}");
        }
    }
}
