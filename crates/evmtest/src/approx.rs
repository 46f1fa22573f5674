//! Tolerance-based equality for asynchronously resolved numbers.
//!
//! On-chain timestamps drift a little between the moment a test computes an
//! expected value and the moment the node seals a block; comparisons that
//! involve them need a small margin rather than exact equality.

use std::future::Future;

use crate::HarnessError;

/// Default comparison margin
pub const DEFAULT_MARGIN: i128 = 3;

/// Require two awaited numbers to differ by less than [`DEFAULT_MARGIN`]
pub async fn almost_equal<P1, P2, T1, T2>(
    p1: P1,
    p2: P2,
    reason: &str,
) -> Result<(), HarnessError>
where
    P1: Future<Output = T1>,
    P2: Future<Output = T2>,
    T1: Into<i128>,
    T2: Into<i128>,
{
    almost_equal_within(p1, p2, reason, DEFAULT_MARGIN).await
}

/// Require two awaited numbers to differ by less than `margin`
pub async fn almost_equal_within<P1, P2, T1, T2>(
    p1: P1,
    p2: P2,
    reason: &str,
    margin: i128,
) -> Result<(), HarnessError>
where
    P1: Future<Output = T1>,
    P2: Future<Output = T2>,
    T1: Into<i128>,
    T2: Into<i128>,
{
    let a: i128 = p1.await.into();
    let b: i128 = p2.await.into();
    let difference = (a - b).abs();

    if difference < margin {
        Ok(())
    } else {
        Err(HarnessError::ToleranceExceeded {
            reason: reason.to_string(),
            difference,
            margin,
        })
    }
}
