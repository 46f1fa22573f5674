//! Extraction and matching of emitted events from transaction receipts

use std::future::Future;

use evmtest_types::{CallResult, EventArgs, Receipt};

use crate::HarnessError;

/// Result of an [`events_for`] extraction.
///
/// A single matching entry is returned unwrapped — the common case is a
/// test expecting exactly one event — while several matches come back as a
/// sequence in concatenation order.
#[derive(Clone, Debug, PartialEq)]
pub enum EventMatches {
    /// Exactly one log entry matched
    Single(EventArgs),
    /// Two or more log entries matched
    Many(Vec<EventArgs>),
}

impl EventMatches {
    /// The single matching payload.
    ///
    /// Fails with `EventCardinality` when more than one entry matched.
    pub fn into_single(self) -> Result<EventArgs, HarnessError> {
        match self {
            EventMatches::Single(args) => Ok(args),
            EventMatches::Many(all) => Err(HarnessError::EventCardinality {
                event: "matching".to_string(),
                count: all.len(),
            }),
        }
    }

    /// All matching payloads, in concatenation order
    pub fn into_vec(self) -> Vec<EventArgs> {
        match self {
            EventMatches::Single(args) => vec![args],
            EventMatches::Many(all) => all,
        }
    }
}

/// Extract the argument payload of exactly one named event.
///
/// Filters the receipt's logs to entries named `event` and requires the
/// count to be exactly one.
pub fn single_event(receipt: &Receipt, event: &str) -> Result<EventArgs, HarnessError> {
    let mut matching: Vec<&EventArgs> = receipt.logs_named(event).map(|log| &log.args).collect();

    if matching.len() != 1 {
        return Err(HarnessError::EventCardinality {
            event: event.to_string(),
            count: matching.len(),
        });
    }
    Ok(matching.remove(0).clone())
}

/// Await a call outcome and extract the payloads of the named events.
///
/// Matching entries are concatenated per requested name, in the order the
/// names were given, preserving node order within each name. A rejected
/// call propagates as [`HarnessError::Call`]; an empty result set draws a
/// warning and fails with `EventNotFound`.
pub async fn events_for<F>(outcome: F, events: &[&str]) -> Result<EventMatches, HarnessError>
where
    F: Future<Output = CallResult>,
{
    let receipt = outcome.await?;

    let mut collected: Vec<EventArgs> = Vec::new();
    for event in events {
        collected.extend(receipt.logs_named(event).map(|log| log.args.clone()));
    }

    if collected.is_empty() {
        tracing::warn!("none of the events {:?} were found in the receipt", events);
        return Err(HarnessError::EventNotFound);
    }

    if collected.len() == 1 {
        Ok(EventMatches::Single(collected.remove(0)))
    } else {
        Ok(EventMatches::Many(collected))
    }
}

/// Require that no log entry with the given event name was emitted.
///
/// Counts only entries named `event`, so unrelated events in the same
/// receipt do not mask the check.
pub fn assert_no_event(receipt: &Receipt, event: &str) -> Result<(), HarnessError> {
    let count = receipt.logs_named(event).count();
    if count != 0 {
        return Err(HarnessError::UnexpectedEvent {
            event: event.to_string(),
            count,
        });
    }
    Ok(())
}
