//! Token purchase and interest-rate conveniences for test scenarios

use async_trait::async_trait;
use primitive_types::U256;

use evmtest_types::{CallError, Receipt};

use crate::HarnessError;

/// Seconds in the 360-day commercial year used by interest encodings
pub const SECONDS_IN_YEAR: u64 = 360 * 86_400;

/// Tokens minted per unit of base currency sent to `buy_tokens`
pub const PURCHASE_RATE: u64 = 4_000;

/// Encode an annual interest percentage in the on-chain per-second form.
///
/// `annual_interest` must be non-zero.
pub fn to_interest_rate(annual_interest: u64) -> u64 {
    (10_000_000 / annual_interest) * SECONDS_IN_YEAR
}

/// A token contract collaborator, injected by the test scenario
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Current token balance of an account
    async fn balance_of(&self, account: &str) -> Result<U256, CallError>;

    /// Purchase tokens for an account by sending `value` base currency
    async fn buy_tokens(&self, account: &str, value: U256) -> Result<Receipt, CallError>;
}

/// Buy `amount` tokens for `account` and verify the minted balance delta.
///
/// Sends `amount / PURCHASE_RATE` of base currency, then re-reads the
/// balance and requires the delta to equal `amount` exactly.
pub async fn buy_tokens(
    token: &dyn TokenContract,
    amount: U256,
    account: &str,
) -> Result<(), HarnessError> {
    let previous = token.balance_of(account).await?;
    token
        .buy_tokens(account, amount / U256::from(PURCHASE_RATE))
        .await?;
    let current = token.balance_of(account).await?;

    let minted = current.saturating_sub(previous);
    if minted != amount {
        return Err(HarnessError::TokenBalance {
            expected: amount,
            minted,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Token that mints `PURCHASE_RATE` tokens per unit of value, minus a
    /// configurable shortfall
    struct MintingToken {
        balance: Mutex<U256>,
        shortfall: U256,
    }

    impl MintingToken {
        fn new() -> Self {
            Self {
                balance: Mutex::new(U256::zero()),
                shortfall: U256::zero(),
            }
        }

        fn with_shortfall(shortfall: u64) -> Self {
            Self {
                balance: Mutex::new(U256::zero()),
                shortfall: U256::from(shortfall),
            }
        }
    }

    #[async_trait]
    impl TokenContract for MintingToken {
        async fn balance_of(&self, _account: &str) -> Result<U256, CallError> {
            Ok(*self.balance.lock().unwrap())
        }

        async fn buy_tokens(&self, _account: &str, value: U256) -> Result<Receipt, CallError> {
            let minted = value * U256::from(PURCHASE_RATE) - self.shortfall;
            let mut balance = self.balance.lock().unwrap();
            *balance += minted;
            Ok(Receipt::default())
        }
    }

    #[test]
    fn test_to_interest_rate() {
        assert_eq!(to_interest_rate(20), 500_000 * SECONDS_IN_YEAR);
        assert_eq!(to_interest_rate(10_000_000), SECONDS_IN_YEAR);
    }

    #[tokio::test]
    async fn test_buy_tokens_mints_requested_amount() {
        let token = MintingToken::new();
        buy_tokens(&token, U256::from(4_000_000u64), "0xabc")
            .await
            .unwrap();
        assert_eq!(
            token.balance_of("0xabc").await.unwrap(),
            U256::from(4_000_000u64)
        );
    }

    #[tokio::test]
    async fn test_buy_tokens_detects_shortfall() {
        let token = MintingToken::with_shortfall(1);
        let err = buy_tokens(&token, U256::from(4_000_000u64), "0xabc")
            .await
            .unwrap_err();
        match err {
            HarnessError::TokenBalance { expected, minted } => {
                assert_eq!(expected, U256::from(4_000_000u64));
                assert_eq!(minted, U256::from(3_999_999u64));
            }
            other => panic!("expected TokenBalance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_buy_tokens_propagates_call_errors() {
        struct FailingToken;

        #[async_trait]
        impl TokenContract for FailingToken {
            async fn balance_of(&self, _account: &str) -> Result<U256, CallError> {
                Err(CallError::new("revert not on allowlist"))
            }

            async fn buy_tokens(&self, _: &str, _: U256) -> Result<Receipt, CallError> {
                Err(CallError::new("revert not on allowlist"))
            }
        }

        let err = buy_tokens(&FailingToken, U256::from(100u64), "0xabc")
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::Call(_)));
    }
}
