//! # evmtest
//!
//! Test harness for exercising smart-contract transactions against a
//! simulated EVM node.
//!
//! ## Features
//!
//! - **ChainClient**: administrative bridge for advancing simulated chain
//!   time and reading block state
//! - **FailureClassifier**: normalized classification of transaction
//!   failures ("reverts") reported by the node
//! - **Events**: extraction and matching of emitted log events from
//!   transaction receipts
//! - **Words**: fixed-width 32-byte hex encoding for packed call data
//! - **Approx**: tolerance-based equality for timestamp-like values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evmtest::{ChainClient, Deferred, FailureClassifier};
//! use evmtest_types::{CallError, Receipt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fast-forward the simulated clock one hour, then mine
//!     let chain = ChainClient::new_mock();
//!     chain.advance_time(3600).await?;
//!
//!     // Require a call to revert with a specific reason
//!     let classifier = FailureClassifier::new();
//!     let failing = async {
//!         Err::<Receipt, _>(CallError::new(
//!             "VM Exception while processing transaction: revert insufficient balance",
//!         ))
//!     };
//!     classifier
//!         .expect_revert(Deferred::pending(failing), "insufficient balance")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Event Extraction
//!
//! ```rust
//! use evmtest::events::single_event;
//! use evmtest_types::{EventArgs, LogEntry, Receipt};
//!
//! let receipt = Receipt::new(vec![
//!     LogEntry::new("Transfer", EventArgs::new()),
//!     LogEntry::new("Approval", EventArgs::new()),
//! ]);
//!
//! let args = single_event(&receipt, "Transfer")?;
//! assert!(args.is_empty());
//! # Ok::<(), evmtest::HarnessError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod approx;
mod chain;
mod error;
pub mod events;
pub mod revert;
pub mod token;
mod transport;
pub mod words;

// Re-export main types
pub use chain::ChainClient;
pub use error::HarnessError;
pub use events::{assert_no_event, events_for, single_event, EventMatches};
pub use revert::{is_failure_message, Deferred, FailureCategory, FailureClassifier};
pub use transport::{MockTransport, RpcRequest};
pub use words::{concat_fixed_words, to_fixed_word};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export the shared data model for convenience
pub use evmtest_types::{CallError, CallResult, EventArgs, LogEntry, Receipt};
