//! Utility macros and functions for the HTTP crate.
//!
//! This module provides helper macros and functions that are used internally
//! by the HTTP crate implementation.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// The error expression is only evaluated when the predicate is false.
///
/// # Example
///
/// ```ignore
/// ensure!(consumed <= MAX_HEADER_BYTES, ParseError::too_large_header(consumed, MAX_HEADER_BYTES));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

#[cfg(test)]
pub(crate) use test_io::{ChunkedReader, crlf};
