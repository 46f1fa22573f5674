//! Transport layer for the chain collaborator

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::HarnessError;

/// JSON-RPC protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request envelope.
///
/// The id is explicit because the time bridge derives its ids from the wall
/// clock; requests built without one are assigned an id by the sender.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcRequest {
    /// Protocol version, always `"2.0"`
    pub jsonrpc: &'static str,
    /// Request id, if already assigned
    pub id: Option<u64>,
    /// Method name
    pub method: String,
    /// Method parameters
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Create a request without an assigned id
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            method: method.into(),
            params,
        }
    }

    /// Assign an explicit request id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Transport trait for the chain collaborator (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON-RPC request and return the decoded `result` value
    async fn send(&self, request: RpcRequest) -> Result<Value, HarnessError>;
}

/// Mock transport for testing.
///
/// Responses are scripted per method; every request sent through it is
/// recorded so tests can assert on call order and request ids. Cloning
/// yields a handle onto the same scripted state and journal.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    errors: Arc<Mutex<HashMap<String, (i64, String)>>>,
    default_responses: Arc<Mutex<HashMap<String, Value>>>,
    journal: Arc<Mutex<Vec<RpcRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        // Default responses for the administrative methods a simulated
        // node exposes
        defaults.insert("evm_increaseTime".to_string(), Value::from(0u64));
        defaults.insert("evm_mine".to_string(), Value::String("0x0".to_string()));
        defaults.insert(
            "eth_blockNumber".to_string(),
            Value::String("0x100".to_string()), // Block 256
        );
        defaults.insert(
            "eth_getBlockByNumber".to_string(),
            serde_json::json!({
                "number": "0x100",
                "timestamp": "0x5f5e100", // 100_000_000
            }),
        );

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a mock response for a specific method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread
    /// panicked while holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Script an RPC error for a specific method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_error(&self, method: &str, code: i64, message: &str) {
        self.errors
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), (code, message.to_string()));
    }

    /// Clear custom responses and scripted errors
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
        self.errors
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }

    /// Every request sent through this transport, in send order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn sent(&self) -> Vec<RpcRequest> {
        self.journal
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RpcRequest) -> Result<Value, HarnessError> {
        let method = request.method.clone();

        self.journal
            .lock()
            .map_err(|_| HarnessError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(request);

        let scripted_error = self
            .errors
            .lock()
            .map_err(|_| HarnessError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&method)
            .cloned();

        if let Some((code, message)) = scripted_error {
            return Err(HarnessError::Rpc { code, message });
        }

        // Check custom responses first
        let custom_response = self
            .responses
            .lock()
            .map_err(|_| HarnessError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&method)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        // Fall back to defaults
        let default_response = self
            .default_responses
            .lock()
            .map_err(|_| HarnessError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&method)
            .cloned();

        if let Some(response) = default_response {
            return Ok(response);
        }

        Err(HarnessError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport for a real simulated-node endpoint
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RpcRequest) -> Result<Value, HarnessError> {
        let id = request.id.unwrap_or_else(|| self.next_id());
        let payload = serde_json::json!({
            "jsonrpc": request.jsonrpc,
            "id": id,
            "method": request.method,
            "params": request.params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HarnessError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| HarnessError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(HarnessError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| HarnessError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
