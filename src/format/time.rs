//! Duration and timestamp formatting

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Format a duration the way Go's `time.Duration` prints itself.
///
/// `60s` renders as `1m0s`, `1.5s` as `1.5s`, `250ms` as `250ms`.
#[must_use]
pub fn go_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000, 3));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos, 1_000_000, 6));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = decimal(nanos % 60_000_000_000, 1_000_000_000, 9);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `value / unit` with the fractional part printed without trailing zeros.
fn decimal(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Elapsed time between two instants, rounded to the nearest millisecond.
///
/// A capture time earlier than the start time yields zero.
#[must_use]
pub fn elapsed_millis(start: DateTime<Utc>, end: DateTime<Utc>) -> Duration {
    let elapsed = (end - start).to_std().unwrap_or_default();
    let millis = (elapsed.as_nanos() + 500_000) / 1_000_000;
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Format a report entry timestamp as `MM/DD/YY HH:MM:SS.fff`.
///
/// Milliseconds drop trailing zeros, and the fraction is omitted entirely
/// when it is zero.
#[must_use]
pub fn entry_timestamp(time: &DateTime<Utc>) -> String {
    let base = time.format("%m/%d/%y %H:%M:%S").to_string();
    let millis = time.timestamp_subsec_millis();
    if millis == 0 {
        return base;
    }
    let frac = format!("{millis:03}");
    format!("{base}.{}", frac.trim_end_matches('0'))
}

/// Serde adapter storing a [`Duration`] as floating point seconds.
pub mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as seconds
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    /// Deserialize from seconds
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
