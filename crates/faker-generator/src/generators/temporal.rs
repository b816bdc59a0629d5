//! Date, datetime and time-of-day generators.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use faker_core::FakeValue;
use rand::Rng;

/// Earliest generated instant (1970-01-01T00:00:00Z).
pub const MIN_TIMESTAMP: i64 = 0;
/// Latest generated instant (2037-12-31T23:59:59Z).
pub const MAX_TIMESTAMP: i64 = 2_145_916_799;

const SECONDS_PER_DAY: i64 = 86_400;

/// Generate a random whole-second UTC timestamp in the given range.
pub fn generate_datetime_range<R: Rng>(rng: &mut R, start_ts: i64, end_ts: i64) -> FakeValue {
    let ts = if start_ts >= end_ts {
        start_ts
    } else {
        rng.random_range(start_ts..=end_ts)
    };
    let dt = DateTime::from_timestamp(ts, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    FakeValue::DateTime(dt)
}

/// Generate a random UTC timestamp with the default bounds.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> FakeValue {
    generate_datetime_range(rng, MIN_TIMESTAMP, MAX_TIMESTAMP)
}

/// Generate a random calendar date with the default bounds.
pub fn generate_date<R: Rng>(rng: &mut R) -> FakeValue {
    let days = rng.random_range(0..=MAX_TIMESTAMP / SECONDS_PER_DAY);
    let date = DateTime::from_timestamp(days * SECONDS_PER_DAY, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or(NaiveDate::MIN);
    FakeValue::Date(date)
}

/// Generate a random whole-second time of day.
pub fn generate_time<R: Rng>(rng: &mut R) -> FakeValue {
    let secs = rng.random_range(0..SECONDS_PER_DAY as u32);
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN);
    FakeValue::Time(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_datetime_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            if let FakeValue::DateTime(dt) = generate_datetime(&mut rng) {
                assert!(dt.year() >= 1970 && dt.year() <= 2037);
                assert_eq!(dt.nanosecond(), 0);
            } else {
                panic!("Expected DateTime value");
            }
        }
    }

    #[test]
    fn test_empty_range_uses_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = generate_datetime_range(&mut rng, 100, 100);
        assert_eq!(
            value,
            FakeValue::DateTime(DateTime::from_timestamp(100, 0).unwrap())
        );
    }

    #[test]
    fn test_generate_date_and_time() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            match generate_date(&mut rng) {
                FakeValue::Date(d) => assert!(d.year() >= 1970 && d.year() <= 2037),
                other => panic!("Expected Date value, got {other:?}"),
            }
            match generate_time(&mut rng) {
                FakeValue::Time(t) => assert_eq!(t.nanosecond(), 0),
                other => panic!("Expected Time value, got {other:?}"),
            }
        }
    }
}
