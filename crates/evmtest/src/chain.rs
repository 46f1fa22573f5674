//! Chain client: simulated-time bridge and block queries

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::transport::{MockTransport, RpcRequest, Transport};
use crate::HarnessError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for the simulated chain node's administrative surface.
///
/// Owns its transport; inject a [`MockTransport`] in tests or connect over
/// HTTP to a running node.
pub struct ChainClient {
    transport: Box<dyn Transport>,
    request_id: AtomicU64,
}

impl ChainClient {
    /// Create a client backed by an HTTP transport
    #[cfg(feature = "http")]
    pub fn connect(url: &str) -> Self {
        Self::with_transport(HttpTransport::new(url))
    }

    /// Create a client with a mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            request_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, HarnessError> {
        self.transport
            .send(RpcRequest::new(method, params).with_id(self.next_id()))
            .await
    }

    /// Advance the node's simulated clock and force a block.
    ///
    /// Issues `evm_increaseTime` and then `evm_mine`, strictly in that
    /// order: the mine request is only sent once the clock advance has
    /// succeeded, and either error aborts the whole operation unchanged.
    /// The first request id is the current wall-clock epoch in
    /// milliseconds; the second is that id plus one.
    pub async fn advance_time(&self, duration_secs: u64) -> Result<(), HarnessError> {
        let id = wall_clock_id();

        self.transport
            .send(RpcRequest::new("evm_increaseTime", vec![json!(duration_secs)]).with_id(id))
            .await?;
        self.transport
            .send(RpcRequest::new("evm_mine", vec![]).with_id(id + 1))
            .await?;

        Ok(())
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<u64, HarnessError> {
        let result = self.request("eth_blockNumber", vec![]).await?;
        parse_u64(&result)
    }

    /// Get the timestamp of the latest block.
    ///
    /// Fetches the current block number first, then reads that block's
    /// `timestamp` field.
    pub async fn block_time(&self) -> Result<u64, HarnessError> {
        let number = self.block_number().await?;
        let block = self
            .request(
                "eth_getBlockByNumber",
                vec![json!(format!("0x{:x}", number)), json!(false)],
            )
            .await?;

        let timestamp = block
            .get("timestamp")
            .ok_or_else(|| HarnessError::MissingField("timestamp".to_string()))?;
        parse_u64(timestamp)
    }
}

/// Current wall-clock epoch time in milliseconds; administrative request
/// ids are derived from it
fn wall_clock_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Parse a hex quantity (`"0x..."`) from a JSON response value
fn parse_u64(value: &Value) -> Result<u64, HarnessError> {
    let s = value
        .as_str()
        .ok_or_else(|| HarnessError::Serialization("quantity must be a hex string".to_string()))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| HarnessError::InvalidHex(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64(&json!("0x1")).unwrap(), 1);
        assert_eq!(parse_u64(&json!("0x100")).unwrap(), 256);
        assert_eq!(parse_u64(&json!("100")).unwrap(), 256);
    }

    #[test]
    fn test_parse_u64_rejects_non_strings() {
        assert!(parse_u64(&json!(256)).is_err());
        assert!(parse_u64(&json!("0xzz")).is_err());
    }

    #[test]
    fn test_wall_clock_id_is_monotonic_enough() {
        let a = wall_clock_id();
        let b = wall_clock_id();
        assert!(b >= a);
        assert!(a > 0);
    }

    #[tokio::test]
    async fn test_block_number_mock_default() {
        let client = ChainClient::new_mock();
        assert_eq!(client.block_number().await.unwrap(), 256);
    }

    #[tokio::test]
    async fn test_block_time_reads_timestamp() {
        let client = ChainClient::new_mock();
        assert_eq!(client.block_time().await.unwrap(), 100_000_000);
    }

    #[tokio::test]
    async fn test_block_time_missing_timestamp() {
        let transport = MockTransport::new();
        transport.set_response("eth_getBlockByNumber", json!({ "number": "0x100" }));
        let client = ChainClient::with_transport(transport);

        let result = client.block_time().await;
        assert!(matches!(result, Err(HarnessError::MissingField(_))));
    }
}
