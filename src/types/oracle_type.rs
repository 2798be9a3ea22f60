//! Oracle column types targeted by the coercion engine.
//!
//! The declared SQL type of a bind placeholder or result column decides
//! which native representation the coercion engine produces or consumes.
//! The ANSI aliases collapse into their Oracle storage forms here:
//! INTEGER/INT/SMALLINT are NUMBER(38,0), FLOAT is NUMBER with binary
//! precision 126, REAL with 63.

use crate::error::{Error, Result};

/// Oracle data type with type-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleType {
    /// VARCHAR2(max_size) - variable-length string.
    Varchar2 { max_size: u32 },
    /// CHAR(size) - fixed-length string.
    Char { max_size: u32 },
    /// NUMBER(precision, scale) - fixed-point numeric.
    Number { precision: u8, scale: i8 },
    /// ANSI FLOAT/REAL - NUMBER with binary precision, IEEE double
    /// semantics at the driver boundary.
    Float { binary_precision: u8 },
    /// BINARY_FLOAT - IEEE single precision.
    BinaryFloat,
    /// BINARY_DOUBLE - IEEE double precision.
    BinaryDouble,
    /// DATE - date/time at second granularity, no timezone.
    Date,
    /// TIMESTAMP - fractional seconds, no timezone.
    Timestamp,
    /// TIMESTAMP WITH TIME ZONE.
    TimestampTz,
    /// TIMESTAMP WITH LOCAL TIME ZONE.
    TimestampLtz,
    /// INTERVAL YEAR TO MONTH.
    IntervalYm,
    /// INTERVAL DAY TO SECOND.
    IntervalDs,
    /// RAW(max_size) - binary data.
    Raw { max_size: u32 },
    /// LONG - legacy large text type.
    Long,
    /// LONG RAW - legacy large binary type.
    LongRaw,
    /// CLOB - Character Large Object.
    Clob,
    /// NCLOB - National Character Large Object.
    Nclob,
    /// BLOB - Binary Large Object.
    Blob,
    /// ROWID - row address, fetched as text.
    Rowid,
}

impl OracleType {
    /// Create from a declared SQL type name and its metadata.
    ///
    /// Returns `Err(Error::UnsupportedColumnType)` for unknown names.
    pub fn from_declared(name: &str, precision: u8, scale: i8, max_size: u32) -> Result<Self> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "NUMBER" | "DEC" | "DECIMAL" | "NUMERIC" => Ok(OracleType::Number { precision, scale }),
            "INTEGER" | "INT" | "SMALLINT" => Ok(OracleType::Number {
                precision: 38,
                scale: 0,
            }),
            "FLOAT" => Ok(OracleType::Float {
                binary_precision: 126,
            }),
            "REAL" => Ok(OracleType::Float {
                binary_precision: 63,
            }),
            "BINARY_FLOAT" => Ok(OracleType::BinaryFloat),
            "BINARY_DOUBLE" => Ok(OracleType::BinaryDouble),
            "DATE" => Ok(OracleType::Date),
            "TIMESTAMP" => Ok(OracleType::Timestamp),
            "TIMESTAMP WITH TIME ZONE" => Ok(OracleType::TimestampTz),
            "TIMESTAMP WITH LOCAL TIME ZONE" => Ok(OracleType::TimestampLtz),
            "INTERVAL YEAR TO MONTH" => Ok(OracleType::IntervalYm),
            "INTERVAL DAY TO SECOND" => Ok(OracleType::IntervalDs),
            "RAW" => Ok(OracleType::Raw { max_size }),
            "LONG" => Ok(OracleType::Long),
            "LONG RAW" => Ok(OracleType::LongRaw),
            "VARCHAR2" | "NVARCHAR2" | "VARCHAR" => Ok(OracleType::Varchar2 { max_size }),
            "CHAR" | "NCHAR" => Ok(OracleType::Char { max_size }),
            "CLOB" => Ok(OracleType::Clob),
            "NCLOB" => Ok(OracleType::Nclob),
            "BLOB" => Ok(OracleType::Blob),
            "ROWID" | "UROWID" => Ok(OracleType::Rowid),
            _ => Err(Error::UnsupportedColumnType {
                name: name.to_string(),
            }),
        }
    }

    /// Get precision (for Number types, 0 otherwise).
    pub fn precision(&self) -> u8 {
        match self {
            OracleType::Number { precision, .. } => *precision,
            _ => 0,
        }
    }

    /// Get scale (for Number types, 0 otherwise).
    pub fn scale(&self) -> i8 {
        match self {
            OracleType::Number { scale, .. } => *scale,
            _ => 0,
        }
    }

    /// Whether the type stores fixed-point decimals.
    pub fn is_fixed_point(&self) -> bool {
        matches!(self, OracleType::Number { .. })
    }

    /// Whether the type carries character data.
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            OracleType::Varchar2 { .. }
                | OracleType::Char { .. }
                | OracleType::Long
                | OracleType::Clob
                | OracleType::Nclob
                | OracleType::Rowid
        )
    }

    /// Whether the type carries binary data.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            OracleType::Raw { .. } | OracleType::LongRaw | OracleType::Blob
        )
    }
}

impl std::fmt::Display for OracleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleType::Varchar2 { max_size } => write!(f, "VARCHAR2({})", max_size),
            OracleType::Char { max_size } => write!(f, "CHAR({})", max_size),
            OracleType::Number { precision, scale } => {
                if *precision == 0 && *scale == 0 {
                    write!(f, "NUMBER")
                } else if *scale == 0 {
                    write!(f, "NUMBER({})", precision)
                } else {
                    write!(f, "NUMBER({},{})", precision, scale)
                }
            }
            OracleType::Float { binary_precision } => write!(f, "FLOAT({})", binary_precision),
            OracleType::BinaryFloat => write!(f, "BINARY_FLOAT"),
            OracleType::BinaryDouble => write!(f, "BINARY_DOUBLE"),
            OracleType::Date => write!(f, "DATE"),
            OracleType::Timestamp => write!(f, "TIMESTAMP"),
            OracleType::TimestampTz => write!(f, "TIMESTAMP WITH TIME ZONE"),
            OracleType::TimestampLtz => write!(f, "TIMESTAMP WITH LOCAL TIME ZONE"),
            OracleType::IntervalYm => write!(f, "INTERVAL YEAR TO MONTH"),
            OracleType::IntervalDs => write!(f, "INTERVAL DAY TO SECOND"),
            OracleType::Raw { max_size } => write!(f, "RAW({})", max_size),
            OracleType::Long => write!(f, "LONG"),
            OracleType::LongRaw => write!(f, "LONG RAW"),
            OracleType::Clob => write!(f, "CLOB"),
            OracleType::Nclob => write!(f, "NCLOB"),
            OracleType::Blob => write!(f, "BLOB"),
            OracleType::Rowid => write!(f, "ROWID"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_declared_number_aliases() {
        for name in ["NUMBER", "DEC", "DECIMAL", "NUMERIC"] {
            let t = OracleType::from_declared(name, 38, 10, 0).unwrap();
            assert_eq!(
                t,
                OracleType::Number {
                    precision: 38,
                    scale: 10
                }
            );
        }
    }

    #[test]
    fn test_from_declared_integer_aliases() {
        for name in ["INTEGER", "INT", "SMALLINT"] {
            let t = OracleType::from_declared(name, 0, 0, 0).unwrap();
            assert_eq!(
                t,
                OracleType::Number {
                    precision: 38,
                    scale: 0
                }
            );
        }
    }

    #[test]
    fn test_from_declared_float_aliases() {
        assert_eq!(
            OracleType::from_declared("FLOAT", 0, 0, 0).unwrap(),
            OracleType::Float {
                binary_precision: 126
            }
        );
        assert_eq!(
            OracleType::from_declared("REAL", 0, 0, 0).unwrap(),
            OracleType::Float {
                binary_precision: 63
            }
        );
    }

    #[test]
    fn test_from_declared_case_insensitive() {
        assert_eq!(
            OracleType::from_declared("binary_double", 0, 0, 0).unwrap(),
            OracleType::BinaryDouble
        );
    }

    #[test]
    fn test_from_declared_unknown() {
        let t = OracleType::from_declared("XMLTYPE", 0, 0, 0);
        assert!(matches!(t, Err(Error::UnsupportedColumnType { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", OracleType::Varchar2 { max_size: 50 }),
            "VARCHAR2(50)"
        );
        assert_eq!(
            format!(
                "{}",
                OracleType::Number {
                    precision: 10,
                    scale: 2
                }
            ),
            "NUMBER(10,2)"
        );
        assert_eq!(
            format!(
                "{}",
                OracleType::Number {
                    precision: 0,
                    scale: 0
                }
            ),
            "NUMBER"
        );
        assert_eq!(
            format!("{}", OracleType::IntervalDs),
            "INTERVAL DAY TO SECOND"
        );
    }
}
