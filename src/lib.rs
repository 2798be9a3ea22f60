//! Oracle driver core for Rust
//!
//! The value-marshaling and connection-resilience layer of an Oracle
//! database driver: DSN parsing, connection-health classification and
//! bidirectional type coercion between the driver's neutral values and
//! Oracle's native column representations. The wire protocol itself is
//! delegated to a native session reached through the
//! [`SessionOpener`]/[`NativeSession`] capability traits.
//!
//! # Example
//!
//! ```
//! use oracle_oci_rs::{is_bad_connection, Dsn, Result};
//!
//! fn main() -> Result<()> {
//!     // Parse a connection descriptor.
//!     let dsn = Dsn::parse("scott/tiger@db1:1521/ORCL?prefetch_rows=50")?;
//!     assert_eq!(dsn.username, "scott");
//!     assert_eq!(dsn.connect, "db1:1521/ORCL");
//!
//!     // Classify a session error: discard-and-reopen vs. surface.
//!     assert!(is_bad_connection("ORA-03114"));
//!     assert!(!is_bad_connection("ORA-00001"));
//!
//!     Ok(())
//! }
//! ```

pub mod coerce;
pub mod connection;
pub mod dsn;
pub mod error;
pub mod health;
pub mod session;
pub mod types;

// Re-export main types
pub use coerce::{coerce_in, coerce_out};
pub use connection::{Connection, QueryResult};
pub use dsn::{Dsn, OperationMode, TimeLocation};
pub use error::{Error, Result};
pub use health::{is_bad_connection, is_bad_connection_code};
pub use session::{NativeResult, NativeSession, NativeValue, SessionOpener};
pub use types::{Column, ColumnInfo, OracleType, Row, Value};
