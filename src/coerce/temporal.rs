//! Interval and timestamp helpers.

use chrono::{NaiveDateTime, Timelike};

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Split a nanosecond count into whole seconds and the sub-second
/// remainder. Both parts carry the sign of the input.
pub(crate) fn split_nanos(nanoseconds: i64) -> (i64, i32) {
    (
        nanoseconds / NANOS_PER_SECOND,
        (nanoseconds % NANOS_PER_SECOND) as i32,
    )
}

/// Reassemble a nanosecond count from its split parts.
pub(crate) fn join_nanos(seconds: i64, nanoseconds: i32) -> i64 {
    seconds
        .saturating_mul(NANOS_PER_SECOND)
        .saturating_add(i64::from(nanoseconds))
}

/// DATE columns carry second granularity; drop sub-second precision.
pub(crate) fn truncate_to_seconds(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.with_nanosecond(0).unwrap_or(datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_split_positive() {
        assert_eq!(split_nanos(1_500_000_000), (1, 500_000_000));
        assert_eq!(split_nanos(999_999_999), (0, 999_999_999));
        assert_eq!(split_nanos(2_000_000_000), (2, 0));
    }

    #[test]
    fn test_split_negative_keeps_sign() {
        assert_eq!(split_nanos(-1_500_000_000), (-1, -500_000_000));
        assert_eq!(split_nanos(-999_999_999), (0, -999_999_999));
    }

    #[test]
    fn test_split_join_round_trip() {
        for nanos in [
            0,
            1,
            -1,
            999_999_999,
            1_000_000_000,
            -86_400_000_000_000i64,
            123_456_789_987_654_321,
        ] {
            let (s, ns) = split_nanos(nanos);
            assert_eq!(join_nanos(s, ns), nanos);
        }
    }

    #[test]
    fn test_truncate_to_seconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 10, 21)
            .unwrap()
            .and_hms_nano_opt(12, 36, 5, 123_456_789)
            .unwrap();
        let truncated = truncate_to_seconds(dt);
        assert_eq!(truncated.nanosecond(), 0);
        assert_eq!(truncated.second(), 5);
    }
}
