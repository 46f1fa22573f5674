//! Harness error types

use evmtest_types::CallError;
use primitive_types::U256;
use thiserror::Error;

/// Error type for every check and chain interaction in the harness.
///
/// Assertion-style failures (`ExpectedFailureNotRaised`, `EventCardinality`,
/// `ToleranceExceeded`, ...) are surfaced synchronously as `Err` values and
/// are never retried; transport and RPC errors propagate unchanged as fatal
/// setup errors.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// A contract call rejected where the check needed its receipt
    #[error("contract call failed: {0}")]
    Call(#[from] CallError),

    /// A failure was required but the transaction succeeded
    #[error("expected throw not received")]
    ExpectedFailureNotRaised,

    /// The rejection message matched no known failure category
    #[error("expected throw, got '{0}' instead")]
    UnrecognizedFailure(String),

    /// The rejection message did not carry the required revert reason
    #[error("expected a revert '{expected}', got '{actual}' instead")]
    RevertMismatch {
        /// The revert marker plus expected reason
        expected: String,
        /// The node's actual message
        actual: String,
    },

    /// Wrong number of matching log entries
    #[error("should have only one {event}, got {count}")]
    EventCardinality {
        /// Event name that was filtered for
        event: String,
        /// Number of matching entries found
        count: usize,
    },

    /// An event was emitted where none was allowed
    #[error("should have not emitted the event {event}, got {count}")]
    UnexpectedEvent {
        /// Event name that was filtered for
        event: String,
        /// Number of matching entries found
        count: usize,
    },

    /// No log entry matched any of the requested event names
    #[error("no matching events found")]
    EventNotFound,

    /// Numeric values differ beyond the allowed margin
    #[error("{reason}: difference {difference} exceeds margin {margin}")]
    ToleranceExceeded {
        /// Caller-supplied description of the comparison
        reason: String,
        /// Absolute difference between the two values
        difference: i128,
        /// The margin that was exceeded
        margin: i128,
    },

    /// A hex body longer than one 32-byte word; truncation is never attempted
    #[error("hex body exceeds 64 characters: got {len}")]
    WordOverflow {
        /// Length of the offending hex body
        len: usize,
    },

    /// Invalid hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A scalar that cannot be encoded as a 32-byte word
    #[error("cannot encode value as a 32-byte word: {0}")]
    InvalidWord(String),

    /// Malformed response payload
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Required field absent from a response payload
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Token purchase minted a different amount than requested
    #[error("should have minted tokens: expected {expected}, minted {minted}")]
    TokenBalance {
        /// Amount the purchase was expected to mint
        expected: U256,
        /// Amount actually minted
        minted: U256,
    },
}
