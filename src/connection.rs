//! High-level connection API over a native session.
//!
//! The connection owns the parsed DSN and the opened native session. Per
//! statement it describes the bind targets, coerces the caller's neutral
//! values out, executes, and coerces the fetched native values back in.
//! Immediately after any session-level failure the health classifier runs
//! and a fatal verdict poisons the connection; retry and reconnection
//! policy stay with the caller.

use crate::coerce::{coerce_in, coerce_out};
use crate::dsn::Dsn;
use crate::error::{Error, Result};
use crate::health::{is_bad_connection, is_bad_connection_code};
use crate::session::{NativeSession, SessionOpener};
use crate::types::{ColumnInfo, Row, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a statement execution.
#[derive(Debug)]
pub struct QueryResult {
    /// Shared column metadata (empty for DML).
    pub columns: Arc<ColumnInfo>,
    /// Rows returned.
    pub rows: Vec<Row>,
    /// Rows affected by DML.
    pub rows_affected: u64,
}

impl QueryResult {
    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.column_names()
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl IntoIterator for QueryResult {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// An open database connection.
#[derive(Debug)]
pub struct Connection<S: NativeSession> {
    /// The native session performing the actual protocol work.
    session: S,
    /// Descriptor this connection was opened with.
    dsn: Dsn,
    /// Set once the health classifier declares the session unusable.
    dead: bool,
}

impl<S: NativeSession> Connection<S> {
    /// Parse a DSN string and open a connection through the given opener.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let conn = Connection::connect(&opener, "scott/tiger@db1:1521/ORCL").await?;
    /// ```
    pub async fn connect<O>(opener: &O, dsn_string: &str) -> Result<Self>
    where
        O: SessionOpener<Session = S>,
    {
        let dsn = Dsn::parse(dsn_string)?;
        Self::connect_with_dsn(opener, dsn).await
    }

    /// Open a connection from an already-parsed descriptor.
    pub async fn connect_with_dsn<O>(opener: &O, dsn: Dsn) -> Result<Self>
    where
        O: SessionOpener<Session = S>,
    {
        debug!(connect = %dsn.connect, username = %dsn.username, "opening session");
        let session = opener.open(&dsn).await?;
        Ok(Self {
            session,
            dsn,
            dead: false,
        })
    }

    /// The descriptor this connection was opened with.
    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }

    /// Whether the session has been declared unusable.
    ///
    /// A dead connection refuses further statements; discard it and open
    /// a new one.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Execute a statement without bind arguments.
    pub async fn query(&mut self, sql: &str) -> Result<QueryResult> {
        self.execute(sql, &[]).await
    }

    /// Execute a statement with neutral bind arguments.
    ///
    /// Bind target types come from the session's statement description;
    /// each argument is coerced to the exact native representation its
    /// target column requires, and fetched columns are coerced back.
    pub async fn execute(&mut self, sql: &str, args: &[Value]) -> Result<QueryResult> {
        if self.dead {
            return Err(Error::ConnectionClosed);
        }

        let bind_types = match self.session.describe_binds(sql).await {
            Ok(types) => types,
            Err(err) => return Err(self.classify_failure(err)),
        };
        if bind_types.len() != args.len() {
            return Err(Error::BindCountMismatch {
                expected: bind_types.len(),
                actual: args.len(),
            });
        }

        let mut binds = Vec::with_capacity(args.len());
        for (value, target) in args.iter().zip(&bind_types) {
            binds.push(coerce_out(value, target)?);
        }

        let native = match self.session.execute(sql, &binds).await {
            Ok(result) => result,
            Err(err) => return Err(self.classify_failure(err)),
        };

        let column_info = Arc::new(ColumnInfo::new(native.columns));
        let mut rows = Vec::with_capacity(native.rows.len());
        for native_row in &native.rows {
            let mut values = Vec::with_capacity(native_row.len());
            for (cell, column) in native_row.iter().zip(&column_info.columns) {
                values.push(coerce_in(cell, &column.data_type)?);
            }
            rows.push(Row::new(values, Arc::clone(&column_info)));
        }

        debug!(rows = rows.len(), affected = native.rows_affected, "statement complete");
        Ok(QueryResult {
            columns: column_info,
            rows,
            rows_affected: native.rows_affected,
        })
    }

    /// Close the connection and release the session.
    pub async fn close(mut self) -> Result<()> {
        self.session.close().await
    }

    /// Run the health classifier over a session-level failure, poisoning
    /// the connection when the session is gone. The error itself is
    /// surfaced unchanged.
    ///
    /// The session's own error code takes precedence; the error's ORA
    /// code is the fallback. I/O failures are always fatal.
    fn classify_failure(&mut self, err: Error) -> Error {
        let bad = match self.session.last_error_code() {
            Some(code) => is_bad_connection(&code),
            None => match &err {
                Error::Oracle { code, .. } => is_bad_connection_code(*code),
                Error::Io(_) => true,
                _ => false,
            },
        };
        if bad {
            warn!(error = %err, "session declared dead");
            self.dead = true;
        }
        err
    }
}
