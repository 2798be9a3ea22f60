//! Native session capability interface.
//!
//! The driver core never speaks the wire protocol itself. A
//! [`NativeSession`] implementation (typically a wrapper over the vendor's
//! native client library) owns transport, statement preparation and row
//! transport. The core hands it already-coerced [`NativeValue`]s on bind
//! and converts what comes back on fetch.

use crate::dsn::Dsn;
use crate::error::Result;
use crate::types::{Column, OracleType};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::future::Future;

/// Value representation at the native client boundary.
///
/// Each variant is the exact form a target column type requires on bind,
/// and the form the native layer delivers on fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// SQL NULL.
    Null,
    /// Oracle NUMBER as decimal text, already rounded to the target scale.
    Number(String),
    /// IEEE single precision (BINARY_FLOAT).
    Float(f32),
    /// IEEE double precision (BINARY_DOUBLE, FLOAT, REAL).
    Double(f64),
    /// Character data.
    Varchar(String),
    /// Binary data.
    Raw(Bytes),
    /// DATE: second granularity, no timezone.
    Date(NaiveDateTime),
    /// TIMESTAMP: fractional seconds, no timezone.
    Timestamp(NaiveDateTime),
    /// TIMESTAMP WITH [LOCAL] TIME ZONE.
    TimestampTz(DateTime<FixedOffset>),
    /// INTERVAL YEAR TO MONTH as a month count.
    IntervalYm { months: i64 },
    /// INTERVAL DAY TO SECOND, scaled to seconds at bind time.
    /// Both parts carry the sign of the duration.
    IntervalDs { seconds: i64, nanoseconds: i32 },
}

impl NativeValue {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Short category name, used in coercion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Number(_) => "number",
            NativeValue::Float(_) => "binary float",
            NativeValue::Double(_) => "binary double",
            NativeValue::Varchar(_) => "varchar",
            NativeValue::Raw(_) => "raw",
            NativeValue::Date(_) => "date",
            NativeValue::Timestamp(_) => "timestamp",
            NativeValue::TimestampTz(_) => "timestamp with time zone",
            NativeValue::IntervalYm { .. } => "year-month interval",
            NativeValue::IntervalDs { .. } => "day-second interval",
        }
    }
}

/// One statement's result from the native layer.
#[derive(Debug)]
pub struct NativeResult {
    /// Result column metadata (empty for DML).
    pub columns: Vec<Column>,
    /// Fetched rows, one native value per column.
    pub rows: Vec<Vec<NativeValue>>,
    /// Rows affected by DML.
    pub rows_affected: u64,
}

/// An open native session.
///
/// Implementations are expected to report vendor error codes through
/// [`last_error_code`](NativeSession::last_error_code) so the caller can
/// classify connection health immediately after a failure.
pub trait NativeSession: Send {
    /// Describe the declared target types of a statement's bind
    /// placeholders, in placeholder order.
    fn describe_binds(
        &mut self,
        sql: &str,
    ) -> impl Future<Output = Result<Vec<OracleType>>> + Send;

    /// Execute a statement with already-coerced native bind values.
    fn execute(
        &mut self,
        sql: &str,
        binds: &[NativeValue],
    ) -> impl Future<Output = Result<NativeResult>> + Send;

    /// Vendor code of the most recent error (`"ORA-NNNNN"`), if any.
    fn last_error_code(&self) -> Option<String>;

    /// Close the session and release server resources.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens native sessions from a parsed connection descriptor.
pub trait SessionOpener {
    /// The session type this opener produces.
    type Session: NativeSession;

    /// Open a session for the given descriptor.
    fn open(&self, dsn: &Dsn) -> impl Future<Output = Result<Self::Session>> + Send;
}
