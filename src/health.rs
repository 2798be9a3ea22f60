//! Connection health classification.
//!
//! Distinguishes session-fatal error codes ("the connection is unusable,
//! discard it and reconnect") from statement-level failures on an
//! otherwise healthy session (constraint violations, no-data-found).
//! The caller's retry logic consults this immediately after a failed
//! session operation.

/// Error codes that mean the session or its transport is gone.
///
/// Kept sorted for binary search; add new codes in numeric order.
const BAD_CONNECTION_CODES: &[u32] = &[
    28,    // your session has been killed
    1012,  // not logged on
    1033,  // ORACLE initialization or shutdown in progress
    1034,  // ORACLE not available
    1089,  // immediate shutdown in progress
    3113,  // end-of-file on communication channel
    3114,  // not connected to ORACLE
    3135,  // connection lost contact
    12170, // TNS: connect timeout occurred
    12528, // TNS: listener blocking new connections
    12537, // TNS: connection closed
];

/// Check whether a vendor error code marks the connection as unusable.
///
/// Accepts the `"ORA-NNNNN"` form, with or without trailing message text
/// (`"ORA-03114: not connected to ORACLE"`). Anything that does not parse
/// as an ORA code classifies as healthy.
pub fn is_bad_connection(error_code: &str) -> bool {
    parse_error_code(error_code).is_some_and(is_bad_connection_code)
}

/// Numeric-code variant of [`is_bad_connection`].
pub fn is_bad_connection_code(code: u32) -> bool {
    BAD_CONNECTION_CODES.binary_search(&code).is_ok()
}

fn parse_error_code(error_code: &str) -> Option<u32> {
    let digits = error_code.strip_prefix("ORA-")?;
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse().ok()
}
