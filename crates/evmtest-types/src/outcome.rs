//! Transaction call outcomes

use thiserror::Error;

use crate::receipt::Receipt;

/// Error reported by the node for a failed contract call.
///
/// Carries the human-readable message the node attached to the rejection,
/// e.g. `"VM Exception while processing transaction: revert"`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallError {
    /// The node's error message, verbatim
    pub message: String,
}

impl CallError {
    /// Create a call error from the node's message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a contract call: a receipt, or the node's rejection.
///
/// Produced by the contract-call collaborator, consumed exactly once per
/// test assertion.
pub type CallResult = Result<Receipt, CallError>;
