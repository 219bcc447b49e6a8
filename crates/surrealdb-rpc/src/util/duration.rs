//! Compact unit-suffixed duration text.
//!
//! Encoding writes only day, second and microsecond buckets:
//!
//! ```text
//! 90s          90 seconds
//! 1d3600s      one day and one hour
//! 2s500000us   2.5 seconds
//! ```
//!
//! Decoding accepts the full unit set `w d h m s ms us µs ns`, each at most
//! once and in that order. Years have no fixed length and are rejected.

use std::time::Duration;

use crate::error::DurationParseError;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Recognised units, in the order they must appear, with their length in nanoseconds.
const UNITS: [(&str, u128); 9] = [
    ("w", 7 * 24 * 3600 * NANOS_PER_SECOND),
    ("d", 24 * 3600 * NANOS_PER_SECOND),
    ("h", 3600 * NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("s", NANOS_PER_SECOND),
    ("ms", 1_000_000),
    ("us", NANOS_PER_MICRO),
    ("µs", NANOS_PER_MICRO),
    ("ns", 1),
];

/// Position in the ordering; `us` and `µs` share a slot.
fn unit_rank(index: usize) -> usize {
    if index >= 7 { index - 1 } else { index }
}

/// Formats a duration as days, residual seconds and residual microseconds.
///
/// Zero components are omitted; a zero duration is `0s`. Precision below one
/// microsecond is dropped with a warning.
pub fn format_duration(duration: Duration) -> String {
    let sub_micros = duration.subsec_nanos() % 1_000;
    if sub_micros != 0 {
        tracing::warn!(
            nanos = sub_micros,
            "duration has sub-microsecond precision, truncating to microseconds"
        );
    }

    let days = duration.as_secs() / SECONDS_PER_DAY;
    let seconds = duration.as_secs() % SECONDS_PER_DAY;
    let micros = duration.subsec_micros();

    let mut out = String::new();
    if days != 0 {
        out.push_str(&format!("{days}d"));
    }
    if seconds != 0 {
        out.push_str(&format!("{seconds}s"));
    }
    if micros != 0 {
        out.push_str(&format!("{micros}us"));
    }
    if out.is_empty() {
        out.push_str("0s");
    }
    out
}

/// Parses unit-suffixed duration text.
///
/// Nanoseconds are truncated to microsecond resolution; a warning is emitted
/// when that loses precision.
pub fn parse_duration(text: &str) -> Result<Duration, DurationParseError> {
    if text.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let mut rest = text;
    let mut total: u128 = 0;
    let mut nanos: u128 = 0;
    let mut next_rank = 0;

    while !rest.is_empty() {
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (number, tail) = rest.split_at(digits_len);
        let unit_len = tail
            .char_indices()
            .find(|&(_, c)| !c.is_alphabetic())
            .map_or(tail.len(), |(i, _)| i);
        let (unit, tail) = tail.split_at(unit_len);

        if unit == "y" {
            return Err(DurationParseError::UnsupportedYears);
        }
        if number.is_empty() {
            let context = if unit.is_empty() {
                tail.chars().next().map(String::from).unwrap_or_default()
            } else {
                unit.to_string()
            };
            return Err(DurationParseError::InvalidNumber { context });
        }
        if unit.is_empty() {
            return match tail.chars().next() {
                None => Err(DurationParseError::MissingUnit {
                    number: number.to_string(),
                }),
                Some(c) => Err(DurationParseError::UnknownUnit {
                    unit: c.to_string(),
                }),
            };
        }

        let index = UNITS
            .iter()
            .position(|(name, _)| *name == unit)
            .ok_or_else(|| DurationParseError::UnknownUnit {
                unit: unit.to_string(),
            })?;
        let (name, scale) = UNITS[index];
        let rank = unit_rank(index);
        if rank < next_rank {
            return Err(DurationParseError::UnitOutOfOrder { unit: name });
        }
        next_rank = rank + 1;

        let value: u128 = number.parse().map_err(|_| DurationParseError::Overflow)?;
        let value = value.checked_mul(scale).ok_or(DurationParseError::Overflow)?;
        if name == "ns" {
            nanos = value;
        } else {
            total = total.checked_add(value).ok_or(DurationParseError::Overflow)?;
        }
        rest = tail;
    }

    let lost = nanos % NANOS_PER_MICRO;
    if lost != 0 {
        tracing::warn!(
            nanos = %nanos,
            lost = %lost,
            "nanosecond precision is not supported, truncating to microseconds"
        );
    }
    total = total
        .checked_add(nanos - lost)
        .ok_or(DurationParseError::Overflow)?;

    let seconds = u64::try_from(total / NANOS_PER_SECOND).map_err(|_| DurationParseError::Overflow)?;
    Ok(Duration::new(seconds, (total % NANOS_PER_SECOND) as u32))
}
