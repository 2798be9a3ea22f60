//! Neutral value representation for binds and fetches.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::fmt;

/// A neutral driver value.
///
/// One variant is carried per bind argument or fetched column. The set is
/// closed so the coercion engine can match exhaustively; adding a variant
/// forces every coercion path to be revisited.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean. Bound to numeric columns as 1/0 and fetched back as `Int`.
    Bool(bool),
    /// Signed 64-bit integer. Narrower integers widen into this variant.
    Int(i64),
    /// Unsigned 64-bit integer.
    UInt(u64),
    /// 64-bit floating point. `f32` inputs widen into this variant.
    Float(f64),
    /// Arbitrary-precision decimal, carried as text.
    Decimal(String),
    /// Byte sequence (RAW, LONG RAW, BLOB).
    Bytes(Vec<u8>),
    /// Character data.
    String(String),
    /// Wall-clock timestamp with an optional UTC offset.
    Timestamp {
        datetime: NaiveDateTime,
        offset: Option<FixedOffset>,
    },
    /// Year-to-month interval as a signed month count.
    IntervalYm { months: i64 },
    /// Day-to-second interval as a signed nanosecond count.
    IntervalDs { nanoseconds: i64 },
}

impl Value {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short category name, used in coercion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Timestamp { .. } => "timestamp",
            Value::IntervalYm { .. } => "year-month interval",
            Value::IntervalDs { .. } => "day-second interval",
        }
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to convert to i64.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to f64.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "<RAW: {} bytes>", b.len()),
            Value::String(s) => write!(f, "{}", s),
            Value::Timestamp { datetime, offset } => match offset {
                Some(off) => write!(f, "{} {}", datetime.format("%Y-%m-%d %H:%M:%S%.f"), off),
                None => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S%.f")),
            },
            Value::IntervalYm { months } => write!(f, "<INTERVAL: {} months>", months),
            Value::IntervalDs { nanoseconds } => write!(f, "<INTERVAL: {} ns>", nanoseconds),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}
impl_from_signed!(i8, i16, i32, i64);

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(u64::from(v))
            }
        })*
    };
}
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp {
            datetime: v,
            offset: None,
        }
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Timestamp {
            datetime: v.naive_local(),
            offset: Some(*v.offset()),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
