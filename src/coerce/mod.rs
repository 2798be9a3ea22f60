//! Bidirectional type coercion between neutral and native values.
//!
//! Outbound ([`coerce_out`]) runs when binding statement arguments: the
//! neutral [`Value`] is converted to the exact native representation the
//! target column type requires. Inbound ([`coerce_in`]) converts fetched
//! native column values back to neutral values. Both are pure functions;
//! range enforcement beyond the declared scale belongs to the session
//! layer, never silent truncation here.

mod number;
mod temporal;

use crate::error::{Error, Result};
use crate::session::NativeValue;
use crate::types::{OracleType, Value};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Convert a neutral value to the native representation required by the
/// target column type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCoercion`] for pairings the engine cannot
/// convert (bytes into a numeric column, non-finite floats into NUMBER,
/// malformed decimal text).
pub fn coerce_out(value: &Value, target: &OracleType) -> Result<NativeValue> {
    if value.is_null() {
        return Ok(NativeValue::Null);
    }

    match target {
        OracleType::Number { precision, scale } => {
            coerce_out_number(value, *precision, i32::from(*scale), target)
        }
        OracleType::Float { .. } | OracleType::BinaryDouble => {
            coerce_out_f64(value, target).map(NativeValue::Double)
        }
        // The one contracted lossy conversion: narrowing through IEEE
        // single precision.
        OracleType::BinaryFloat => coerce_out_f64(value, target).map(|v| NativeValue::Float(v as f32)),
        OracleType::Date => match value {
            Value::Timestamp { datetime, .. } => {
                Ok(NativeValue::Date(temporal::truncate_to_seconds(*datetime)))
            }
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::Timestamp => match value {
            Value::Timestamp { datetime, .. } => Ok(NativeValue::Timestamp(*datetime)),
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::TimestampTz | OracleType::TimestampLtz => match value {
            Value::Timestamp { datetime, offset } => {
                let off = offset.unwrap_or_else(|| Utc.fix());
                let utc = *datetime - off;
                Ok(NativeValue::TimestampTz(DateTime::from_naive_utc_and_offset(
                    utc, off,
                )))
            }
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::IntervalYm => match value {
            Value::IntervalYm { months } => Ok(NativeValue::IntervalYm { months: *months }),
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::IntervalDs => match value {
            Value::IntervalDs { nanoseconds } => {
                let (seconds, nanoseconds) = temporal::split_nanos(*nanoseconds);
                Ok(NativeValue::IntervalDs {
                    seconds,
                    nanoseconds,
                })
            }
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::Varchar2 { .. }
        | OracleType::Char { .. }
        | OracleType::Long
        | OracleType::Clob
        | OracleType::Nclob
        | OracleType::Rowid => match value {
            Value::String(s) => Ok(NativeValue::Varchar(s.clone())),
            _ => Err(unsupported_out(value, target)),
        },
        OracleType::Raw { .. } | OracleType::LongRaw | OracleType::Blob => match value {
            Value::Bytes(b) => Ok(NativeValue::Raw(Bytes::copy_from_slice(b))),
            _ => Err(unsupported_out(value, target)),
        },
    }
}

/// Convert a fetched native value back to a neutral value.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCoercion`] when the native value does not
/// match the declared column type.
pub fn coerce_in(native: &NativeValue, source: &OracleType) -> Result<Value> {
    if native.is_null() {
        return Ok(Value::Null);
    }

    match source {
        OracleType::Number { precision, scale } => match native {
            NativeValue::Number(text) => number_to_value(text, *precision, *scale, native, source),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::Float { .. } | OracleType::BinaryDouble => match native {
            NativeValue::Double(v) => Ok(Value::Float(*v)),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::BinaryFloat => match native {
            NativeValue::Float(v) => Ok(Value::Float(f64::from(*v))),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::Date => match native {
            NativeValue::Date(dt) => Ok(Value::Timestamp {
                datetime: *dt,
                offset: None,
            }),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::Timestamp => match native {
            NativeValue::Timestamp(dt) => Ok(Value::Timestamp {
                datetime: *dt,
                offset: None,
            }),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::TimestampTz | OracleType::TimestampLtz => match native {
            NativeValue::TimestampTz(dt) => Ok(Value::Timestamp {
                datetime: dt.naive_local(),
                offset: Some(*dt.offset()),
            }),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::IntervalYm => match native {
            NativeValue::IntervalYm { months } => Ok(Value::IntervalYm { months: *months }),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::IntervalDs => match native {
            NativeValue::IntervalDs {
                seconds,
                nanoseconds,
            } => Ok(Value::IntervalDs {
                nanoseconds: temporal::join_nanos(*seconds, *nanoseconds),
            }),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::Varchar2 { .. }
        | OracleType::Char { .. }
        | OracleType::Long
        | OracleType::Clob
        | OracleType::Nclob
        | OracleType::Rowid => match native {
            NativeValue::Varchar(s) => Ok(Value::String(s.clone())),
            _ => Err(unsupported_in(native, source)),
        },
        OracleType::Raw { .. } | OracleType::LongRaw | OracleType::Blob => match native {
            NativeValue::Raw(b) => Ok(Value::Bytes(b.to_vec())),
            _ => Err(unsupported_in(native, source)),
        },
    }
}

/// Maximum fractional digits of a NUMBER; floating (unconstrained)
/// columns round here, which normalizes without losing digits.
const FLOATING_SCALE: i32 = 127;

/// OCI describes unconstrained NUMBER as precision 0, scale -127; such
/// columns carry no fixed scale to round at.
fn is_floating_number(precision: u8, scale: i8) -> bool {
    precision == 0 || scale == -127
}

fn coerce_out_number(
    value: &Value,
    precision: u8,
    scale: i32,
    target: &OracleType,
) -> Result<NativeValue> {
    let text = match value {
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => {
            number::f64_to_decimal(*f).ok_or_else(|| unsupported_out(value, target))?
        }
        Value::Decimal(text) => text.clone(),
        _ => return Err(unsupported_out(value, target)),
    };
    let scale = if is_floating_number(precision, scale as i8) {
        FLOATING_SCALE
    } else {
        scale
    };
    let rounded =
        number::round_at_scale(&text, scale).ok_or_else(|| unsupported_out(value, target))?;
    Ok(NativeValue::Number(rounded))
}

fn coerce_out_f64(value: &Value, target: &OracleType) -> Result<f64> {
    match value {
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        Value::Int(i) => Ok(*i as f64),
        Value::UInt(u) => Ok(*u as f64),
        Value::Float(f) => Ok(*f),
        Value::Decimal(text) => text
            .trim()
            .parse()
            .map_err(|_| unsupported_out(value, target)),
        _ => Err(unsupported_out(value, target)),
    }
}

/// Fetched NUMBER text becomes an integer when the column carries no
/// fractional scale (declared scale 0, or a floating NUMBER holding an
/// integral value) and it fits in i64; everything else widens to f64.
/// Booleans bound as 1/0 therefore come back as integers.
fn number_to_value(
    text: &str,
    precision: u8,
    scale: i8,
    native: &NativeValue,
    source: &OracleType,
) -> Result<Value> {
    if scale == 0 || is_floating_number(precision, scale) {
        if let Some(i) = number::parse_integral_i64(text) {
            return Ok(Value::Int(i));
        }
    }
    text.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| unsupported_in(native, source))
}

fn unsupported_out(value: &Value, target: &OracleType) -> Error {
    Error::unsupported_coercion(value.kind(), target.to_string())
}

fn unsupported_in(native: &NativeValue, source: &OracleType) -> Error {
    Error::unsupported_coercion(native.kind(), source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const INTEGER: OracleType = OracleType::Number {
        precision: 38,
        scale: 0,
    };
    const NUMBER_38_10: OracleType = OracleType::Number {
        precision: 38,
        scale: 10,
    };

    #[test]
    fn test_null_coerces_to_null_for_every_type() {
        for target in [
            OracleType::Varchar2 { max_size: 10 },
            INTEGER,
            OracleType::BinaryFloat,
            OracleType::Date,
            OracleType::IntervalDs,
            OracleType::Blob,
        ] {
            assert_eq!(coerce_out(&Value::Null, &target).unwrap(), NativeValue::Null);
            assert_eq!(coerce_in(&NativeValue::Null, &target).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_integer_bind_rounds_half_away_from_zero() {
        let native = coerce_out(&Value::Float(1.98), &INTEGER).unwrap();
        assert_eq!(native, NativeValue::Number("2".to_string()));
        let native = coerce_out(&Value::Float(-1.98), &INTEGER).unwrap();
        assert_eq!(native, NativeValue::Number("-2".to_string()));
        let native = coerce_out(&Value::Float(-0.76), &INTEGER).unwrap();
        assert_eq!(native, NativeValue::Number("-1".to_string()));
    }

    #[test]
    fn test_integer_fetch_is_int() {
        let v = coerce_in(&NativeValue::Number("2147483647".to_string()), &INTEGER).unwrap();
        assert_eq!(v, Value::Int(2147483647));
        let v = coerce_in(&NativeValue::Number("-2147483648".to_string()), &INTEGER).unwrap();
        assert_eq!(v, Value::Int(-2147483648));
    }

    #[test]
    fn test_scaled_number_fetch_is_float() {
        // Declared scale != 0 widens to f64 even for integral text.
        let v = coerce_in(&NativeValue::Number("1".to_string()), &NUMBER_38_10).unwrap();
        assert_eq!(v, Value::Float(1.0));
        let v = coerce_in(&NativeValue::Number("1.9873046875".to_string()), &NUMBER_38_10).unwrap();
        assert_eq!(v, Value::Float(1.9873046875));
    }

    #[test]
    fn test_bool_binds_as_one_zero_and_fetches_as_int() {
        let native = coerce_out(&Value::Bool(true), &INTEGER).unwrap();
        assert_eq!(native, NativeValue::Number("1".to_string()));
        assert_eq!(coerce_in(&native, &INTEGER).unwrap(), Value::Int(1));

        let native = coerce_out(&Value::Bool(false), &INTEGER).unwrap();
        assert_eq!(native, NativeValue::Number("0".to_string()));
        assert_eq!(coerce_in(&native, &INTEGER).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_wide_number_passes_through_untruncated() {
        // Beyond i64 range: the engine renders the digits; range checks
        // belong to the session layer.
        let native = coerce_out(
            &Value::Decimal("99999999999999999999999999.99999999".to_string()),
            &OracleType::Number {
                precision: 38,
                scale: 8,
            },
        )
        .unwrap();
        assert_eq!(
            native,
            NativeValue::Number("99999999999999999999999999.99999999".to_string())
        );
    }

    #[test]
    fn test_binary_float_is_lossy_at_single_precision() {
        for v in [
            1.1f64,
            0.00415134616196155548095703125,
            288230381928101358902502915674136903680.0,
            -123456792.0,
        ] {
            let native = coerce_out(&Value::Float(v), &OracleType::BinaryFloat).unwrap();
            let back = coerce_in(&native, &OracleType::BinaryFloat).unwrap();
            assert_eq!(back, Value::Float(f64::from(v as f32)));
        }
    }

    #[test]
    fn test_binary_double_round_trips_exactly() {
        for v in [
            0.0,
            -1.99999988079071044921875,
            1.99999988079071044921875,
            288230381928101358902502915674136903680.0,
            -2147483648.0,
        ] {
            let native = coerce_out(&Value::Float(v), &OracleType::BinaryDouble).unwrap();
            let back = coerce_in(&native, &OracleType::BinaryDouble).unwrap();
            assert_eq!(back, Value::Float(v));
        }
    }

    #[test]
    fn test_float_real_use_double_semantics() {
        let float_col = OracleType::Float {
            binary_precision: 126,
        };
        let native = coerce_out(&Value::Float(1.99999988079071044921875), &float_col).unwrap();
        assert_eq!(native, NativeValue::Double(1.99999988079071044921875));
        let back = coerce_in(&native, &float_col).unwrap();
        assert_eq!(back, Value::Float(1.99999988079071044921875));
    }

    #[test]
    fn test_non_finite_float_into_number_fails() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                coerce_out(&Value::Float(v), &INTEGER),
                Err(Error::UnsupportedCoercion { .. })
            ));
        }
    }

    #[test]
    fn test_bytes_into_number_fails() {
        let err = coerce_out(&Value::Bytes(vec![1, 2, 3]), &INTEGER).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
    }

    #[test]
    fn test_string_into_interval_fails() {
        let err = coerce_out(
            &Value::String("P1Y".to_string()),
            &OracleType::IntervalYm,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
    }

    #[test]
    fn test_interval_variants_not_conflated() {
        // A year-month value must not bind against a day-second column.
        let err = coerce_out(&Value::IntervalYm { months: 14 }, &OracleType::IntervalDs)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
        let err = coerce_out(
            &Value::IntervalDs {
                nanoseconds: 1_000_000_000,
            },
            &OracleType::IntervalYm,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
    }

    #[test]
    fn test_interval_ym_round_trip() {
        for months in [0i64, 1, -1, 14, -26, 1200] {
            let native = coerce_out(&Value::IntervalYm { months }, &OracleType::IntervalYm).unwrap();
            assert_eq!(native, NativeValue::IntervalYm { months });
            let back = coerce_in(&native, &OracleType::IntervalYm).unwrap();
            assert_eq!(back, Value::IntervalYm { months });
        }
    }

    #[test]
    fn test_interval_ds_scales_to_seconds_and_round_trips() {
        let native = coerce_out(
            &Value::IntervalDs {
                nanoseconds: 90_061_000_000_123,
            },
            &OracleType::IntervalDs,
        )
        .unwrap();
        assert_eq!(
            native,
            NativeValue::IntervalDs {
                seconds: 90_061,
                nanoseconds: 123,
            }
        );
        let back = coerce_in(&native, &OracleType::IntervalDs).unwrap();
        assert_eq!(
            back,
            Value::IntervalDs {
                nanoseconds: 90_061_000_000_123
            }
        );
    }

    #[test]
    fn test_date_truncates_to_seconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 10, 21)
            .unwrap()
            .and_hms_nano_opt(12, 36, 5, 999_000_000)
            .unwrap();
        let native = coerce_out(
            &Value::Timestamp {
                datetime: dt,
                offset: None,
            },
            &OracleType::Date,
        )
        .unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 10, 21)
            .unwrap()
            .and_hms_opt(12, 36, 5)
            .unwrap();
        assert_eq!(native, NativeValue::Date(expected));
        assert_eq!(
            coerce_in(&native, &OracleType::Date).unwrap(),
            Value::Timestamp {
                datetime: expected,
                offset: None
            }
        );
    }

    #[test]
    fn test_timestamp_keeps_nanoseconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 10, 21)
            .unwrap()
            .and_hms_nano_opt(12, 36, 5, 123_456_789)
            .unwrap();
        let value = Value::Timestamp {
            datetime: dt,
            offset: None,
        };
        let native = coerce_out(&value, &OracleType::Timestamp).unwrap();
        assert_eq!(coerce_in(&native, &OracleType::Timestamp).unwrap(), value);
    }

    #[test]
    fn test_timestamp_tz_preserves_offset() {
        let dt = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let value = Value::Timestamp {
            datetime: dt,
            offset: Some(offset),
        };
        let native = coerce_out(&value, &OracleType::TimestampTz).unwrap();
        assert_eq!(coerce_in(&native, &OracleType::TimestampTz).unwrap(), value);
    }

    #[test]
    fn test_string_and_bytes_round_trips() {
        let value = Value::String("hello".to_string());
        let native = coerce_out(&value, &OracleType::Varchar2 { max_size: 100 }).unwrap();
        assert_eq!(native, NativeValue::Varchar("hello".to_string()));
        assert_eq!(
            coerce_in(&native, &OracleType::Varchar2 { max_size: 100 }).unwrap(),
            value
        );

        let value = Value::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let native = coerce_out(&value, &OracleType::Raw { max_size: 80 }).unwrap();
        assert_eq!(
            coerce_in(&native, &OracleType::Raw { max_size: 80 }).unwrap(),
            value
        );
    }

    #[test]
    fn test_mismatched_native_value_on_fetch_fails() {
        let err = coerce_in(&NativeValue::Varchar("x".to_string()), &INTEGER).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
        let err = coerce_in(&NativeValue::Double(1.0), &OracleType::BinaryFloat).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCoercion { .. }));
    }
}
