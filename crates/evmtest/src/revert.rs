//! Classification of transaction failures reported by the node.
//!
//! A simulated node rejects failed calls with a free-form message; the only
//! structure available is a handful of literal markers (`"revert"`,
//! `"invalid opcode"`, ...) embedded somewhere in that text. The classifier
//! scans for those markers and decides whether a rejection counts as the
//! failure a test expected.

use std::future::Future;

use evmtest_types::CallResult;

use crate::HarnessError;

/// Recognized failure categories, each tied to a literal marker substring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCategory {
    /// Execution hit an invalid opcode
    InvalidOpcode,
    /// Execution reverted, optionally with a reason string
    Revert,
    /// Execution ran out of gas
    OutOfGas,
    /// Legacy invalid-jump failure reported by older nodes
    InvalidJump,
}

impl FailureCategory {
    /// The literal, case-sensitive marker this category scans for
    pub const fn pattern(self) -> &'static str {
        match self {
            FailureCategory::InvalidOpcode => "invalid opcode",
            FailureCategory::Revert => "revert",
            FailureCategory::OutOfGas => "out of gas",
            FailureCategory::InvalidJump => "invalid JUMP",
        }
    }
}

/// How a category's marker is matched against the message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Marker may appear anywhere in the message
    #[default]
    Anywhere,
    /// Marker must appear past the first character.
    ///
    /// Kept for bug-for-bug compatibility with tooling that rejected a
    /// marker at index zero; the default table does not use it.
    PastStart,
}

impl MatchMode {
    /// Whether `pattern` occurs in `message` under this mode
    pub fn matches(self, message: &str, pattern: &str) -> bool {
        match self {
            MatchMode::Anywhere => message.contains(pattern),
            MatchMode::PastStart => message.find(pattern).is_some_and(|index| index > 0),
        }
    }
}

/// One entry of the classification table
#[derive(Clone, Copy, Debug)]
pub struct CategoryMatcher {
    /// Category this entry recognizes
    pub category: FailureCategory,
    /// Marker substring scanned for
    pub pattern: &'static str,
    /// How the marker is matched
    pub mode: MatchMode,
}

impl CategoryMatcher {
    const fn new(category: FailureCategory) -> Self {
        Self {
            category,
            pattern: category.pattern(),
            mode: MatchMode::Anywhere,
        }
    }
}

/// Default classification table, evaluated in order
pub const DEFAULT_MATCHERS: [CategoryMatcher; 4] = [
    CategoryMatcher::new(FailureCategory::InvalidJump),
    CategoryMatcher::new(FailureCategory::Revert),
    CategoryMatcher::new(FailureCategory::OutOfGas),
    CategoryMatcher::new(FailureCategory::InvalidOpcode),
];

/// Markers for the coarse "did this fail in an expected way" check
const FAILURE_MARKERS: [&str; 3] = ["invalid opcode", "revert", "out of gas"];

/// Whether a node error message looks like an expected execution failure.
///
/// Case-sensitive containment of any of `"invalid opcode"`, `"revert"`,
/// `"out of gas"`. The legacy `"invalid JUMP"` marker is deliberately not
/// part of this coarse check.
pub fn is_failure_message(message: &str) -> bool {
    FAILURE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// A contract call that has not been awaited yet: either a thunk that
/// produces the call when invoked, or a call already in flight.
///
/// Both shapes settle to one [`CallResult`] before classification.
pub enum Deferred<F>
where
    F: Future<Output = CallResult>,
{
    /// A zero-argument closure producing the call future on demand
    Thunk(Box<dyn FnOnce() -> F + Send>),
    /// A call future already in flight
    Pending(F),
}

impl<F> Deferred<F>
where
    F: Future<Output = CallResult>,
{
    /// Wrap a zero-argument closure
    pub fn thunk(call: impl FnOnce() -> F + Send + 'static) -> Self {
        Deferred::Thunk(Box::new(call))
    }

    /// Wrap a call future already in flight
    pub fn pending(call: F) -> Self {
        Deferred::Pending(call)
    }

    /// Normalize to a single awaited outcome
    pub async fn settle(self) -> CallResult {
        match self {
            Deferred::Thunk(call) => call().await,
            Deferred::Pending(call) => call.await,
        }
    }
}

/// Classifies rejected transaction outcomes against the category table.
///
/// The table is fixed at construction and read-only afterwards. The
/// coverage-mode flag is an explicit constructor argument, never read from
/// the process environment: coverage instrumentation rewrites contract
/// bytecode and with it the reported revert reasons, so strict reason
/// matching must be suppressible.
pub struct FailureClassifier {
    matchers: Vec<CategoryMatcher>,
    coverage_mode: bool,
}

impl FailureClassifier {
    /// Classifier with the default category table and strict matching
    pub fn new() -> Self {
        Self {
            matchers: DEFAULT_MATCHERS.to_vec(),
            coverage_mode: false,
        }
    }

    /// Replace the category table
    pub fn with_matchers(mut self, matchers: Vec<CategoryMatcher>) -> Self {
        self.matchers = matchers;
        self
    }

    /// Enable or disable the coverage-mode revert-reason bypass
    pub fn with_coverage_mode(mut self, enabled: bool) -> Self {
        self.coverage_mode = enabled;
        self
    }

    /// First category in table order whose marker matches the message
    pub fn classify(&self, message: &str) -> Option<FailureCategory> {
        self.matchers
            .iter()
            .find(|matcher| matcher.mode.matches(message, matcher.pattern))
            .map(|matcher| matcher.category)
    }

    /// Require the call to fail in one of the recognized categories.
    ///
    /// A resolved receipt is `ExpectedFailureNotRaised`; a rejection
    /// matching no category is `UnrecognizedFailure` carrying the literal
    /// error text.
    pub async fn expect_failure<F>(&self, outcome: F) -> Result<(), HarnessError>
    where
        F: Future<Output = CallResult>,
    {
        match outcome.await {
            Ok(_) => Err(HarnessError::ExpectedFailureNotRaised),
            Err(error) => match self.classify(&error.message) {
                Some(_) => Ok(()),
                None => Err(HarnessError::UnrecognizedFailure(error.message)),
            },
        }
    }

    /// Require the call to revert with the given reason.
    ///
    /// The rejection message must contain `"revert "` followed by
    /// `expected_message`, or just `"revert"` when the expected reason is
    /// empty — an empty reason also draws a non-fatal warning, since
    /// `require`/`revert` calls without messages make failures hard to
    /// attribute. With coverage mode enabled the reason check is skipped
    /// entirely; a rejection of any shape passes.
    pub async fn expect_revert<F>(
        &self,
        call: Deferred<F>,
        expected_message: &str,
    ) -> Result<(), HarnessError>
    where
        F: Future<Output = CallResult>,
    {
        let needle = if expected_message.is_empty() {
            tracing::warn!("there is an empty revert/require message");
            "revert".to_string()
        } else {
            format!("revert {}", expected_message)
        };

        match call.settle().await {
            Ok(_) => Err(HarnessError::ExpectedFailureNotRaised),
            Err(error) => {
                if self.coverage_mode || error.message.contains(&needle) {
                    Ok(())
                } else {
                    Err(HarnessError::RevertMismatch {
                        expected: needle,
                        actual: error.message,
                    })
                }
            }
        }
    }
}

impl Default for FailureClassifier {
    fn default() -> Self {
        Self::new()
    }
}
