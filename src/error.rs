//! Error types for the Oracle driver core.

use std::io;
use thiserror::Error;

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for driver operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reported by the native client layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Structurally unparsable connection string.
    #[error("Malformed DSN: {message}")]
    MalformedDsn { message: String },

    /// Unrecognized timezone name in the DSN `loc` parameter.
    #[error("Invalid timezone: {name}")]
    InvalidTimezone { name: String },

    /// A value/type pairing the coercion engine cannot convert.
    #[error("Unsupported coercion: {value_kind} into {target}")]
    UnsupportedCoercion {
        value_kind: &'static str,
        target: String,
    },

    /// Declared SQL type not known to the driver.
    #[error("Unsupported column type: {name}")]
    UnsupportedColumnType { name: String },

    /// Oracle database error.
    #[error("ORA-{code:05}: {message}")]
    Oracle { code: u32, message: String },

    /// Statement placeholder count does not match the supplied arguments.
    #[error("Bind count mismatch: statement has {expected} placeholders, got {actual} values")]
    BindCountMismatch { expected: usize, actual: usize },

    /// Connection closed or discarded after a fatal session error.
    #[error("Connection closed")]
    ConnectionClosed,
}

impl Error {
    /// Create a malformed-DSN error.
    pub fn malformed_dsn(message: impl Into<String>) -> Self {
        Self::MalformedDsn {
            message: message.into(),
        }
    }

    /// Create an Oracle database error.
    pub fn oracle(code: u32, message: impl Into<String>) -> Self {
        Self::Oracle {
            code,
            message: message.into(),
        }
    }

    /// Create an unsupported-coercion error.
    pub fn unsupported_coercion(value_kind: &'static str, target: impl Into<String>) -> Self {
        Self::UnsupportedCoercion {
            value_kind,
            target: target.into(),
        }
    }
}
