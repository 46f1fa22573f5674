//! Failure classification integration tests for evmtest
//!
//! Exercises expect_failure and expect_revert over resolved and rejected
//! contract-call outcomes.

use evmtest::{CallError, CallResult, Deferred, FailureClassifier, HarnessError, Receipt};

fn rejected(message: &str) -> impl std::future::Future<Output = CallResult> {
    let error = CallError::new(message);
    async move { Err(error) }
}

fn resolved() -> impl std::future::Future<Output = CallResult> {
    async { Ok(Receipt::default()) }
}

// ==================== expect_failure Tests ====================

#[tokio::test]
async fn test_expect_failure_accepts_each_category() {
    let classifier = FailureClassifier::new();
    for message in [
        "VM Exception while processing transaction: revert",
        "VM Exception while processing transaction: invalid opcode",
        "base fee exceeded: out of gas",
        "invalid JUMP at 1053",
    ] {
        classifier
            .expect_failure(rejected(message))
            .await
            .unwrap_or_else(|e| panic!("{} should classify, got {:?}", message, e));
    }
}

#[tokio::test]
async fn test_expect_failure_on_success() {
    let classifier = FailureClassifier::new();
    let err = classifier.expect_failure(resolved()).await.unwrap_err();
    assert!(matches!(err, HarnessError::ExpectedFailureNotRaised));
}

#[tokio::test]
async fn test_expect_failure_unrecognized_reason() {
    let classifier = FailureClassifier::new();
    let err = classifier
        .expect_failure(rejected("connection refused"))
        .await
        .unwrap_err();
    match err {
        HarnessError::UnrecognizedFailure(message) => {
            assert_eq!(message, "connection refused");
        }
        other => panic!("expected UnrecognizedFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_expect_failure_is_case_sensitive() {
    let classifier = FailureClassifier::new();
    let err = classifier
        .expect_failure(rejected("Transaction REVERTED"))
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::UnrecognizedFailure(_)));
}

// ==================== expect_revert Tests ====================

#[tokio::test]
async fn test_expect_revert_with_matching_reason() {
    let classifier = FailureClassifier::new();
    classifier
        .expect_revert(
            Deferred::pending(rejected(
                "VM Exception while processing transaction: revert insufficient balance",
            )),
            "insufficient balance",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expect_revert_reason_mismatch() {
    let classifier = FailureClassifier::new();
    let err = classifier
        .expect_revert(
            Deferred::pending(rejected(
                "VM Exception while processing transaction: revert paused",
            )),
            "insufficient balance",
        )
        .await
        .unwrap_err();
    match err {
        HarnessError::RevertMismatch { expected, actual } => {
            assert_eq!(expected, "revert insufficient balance");
            assert!(actual.contains("revert paused"));
        }
        other => panic!("expected RevertMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_expect_revert_empty_reason_matches_bare_revert() {
    let classifier = FailureClassifier::new();
    classifier
        .expect_revert(
            Deferred::pending(rejected("VM Exception while processing transaction: revert")),
            "",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expect_revert_on_success() {
    let classifier = FailureClassifier::new();
    let err = classifier
        .expect_revert(Deferred::pending(resolved()), "insufficient balance")
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::ExpectedFailureNotRaised));
}

#[tokio::test]
async fn test_expect_revert_thunk_is_invoked_lazily() {
    let classifier = FailureClassifier::new();
    classifier
        .expect_revert(
            Deferred::thunk(|| rejected("execution error: revert too early")),
            "too early",
        )
        .await
        .unwrap();
}

// ==================== Coverage Mode Tests ====================

#[tokio::test]
async fn test_coverage_mode_skips_reason_check() {
    let classifier = FailureClassifier::new().with_coverage_mode(true);
    // instrumented bytecode reports an unrelated reason; the check passes
    classifier
        .expect_revert(
            Deferred::pending(rejected("invalid opcode at pc 1421")),
            "insufficient balance",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_coverage_mode_still_requires_a_rejection() {
    let classifier = FailureClassifier::new().with_coverage_mode(true);
    let err = classifier
        .expect_revert(Deferred::pending(resolved()), "insufficient balance")
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::ExpectedFailureNotRaised));
}
