//! Transaction receipts as reported by a simulated node

use serde::{Deserialize, Serialize};

/// Decoded named arguments of one log entry, keyed by parameter name.
pub type EventArgs = serde_json::Map<String, serde_json::Value>;

/// Log entry emitted during transaction execution.
///
/// The node reports entries in emission order; order between entries with
/// different event names carries no meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Event name as declared in the contract
    pub event: String,
    /// Decoded argument payload
    #[serde(default)]
    pub args: EventArgs,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(event: impl Into<String>, args: EventArgs) -> Self {
        Self {
            event: event.into(),
            args,
        }
    }
}

/// Receipt for a successfully executed transaction.
///
/// Immutable once received; the harness only reads from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Logs emitted by the transaction, in node order
    pub logs: Vec<LogEntry>,
}

impl Receipt {
    /// Create a receipt from its log entries
    pub fn new(logs: Vec<LogEntry>) -> Self {
        Self { logs }
    }

    /// Number of log entries
    pub fn log_count(&self) -> usize {
        self.logs.len()
    }

    /// Iterate over entries with the given event name, preserving node order
    pub fn logs_named<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.logs.iter().filter(move |log| log.event == event)
    }
}
