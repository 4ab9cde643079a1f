use std::str::FromStr;
use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
///
/// Requests for methods without parameters may omit `params`.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// JSON-RPC protocol version (should be "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters
    #[serde(default)]
    pub params: T,

    /// Request identifier
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 successful response
#[derive(Debug, Serialize)]
pub struct JsonRpcSuccess<T> {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    pub id: serde_json::Value,

    /// Method result
    pub result: T,
}

/// JSON-RPC 2.0 error response
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matching the request)
    pub id: serde_json::Value,

    /// Error details
    pub error: JsonRpcErrorDetail,
}

/// JSON-RPC 2.0 error detail
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorDetail {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Create a JSON-RPC error response with an arbitrary code
    pub fn new(id: serde_json::Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: JsonRpcErrorDetail {
                code,
                message: message.into(),
                data: None,
            },
        }
    }
}

impl<T> JsonRpcSuccess<T> {
    /// Create a new JSON-RPC success response
    pub fn new(id: serde_json::Value, result: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

/// Parse a hexadecimal address string into an `Address`.
///
/// Expects a string starting with "0x" and 40 hex digits (20 bytes).
/// Checksums are not enforced, mixed case is accepted as-is.
pub fn parse_hex_address(hex: &str) -> Result<Address, String> {
    if !hex.starts_with("0x") {
        return Err("Address must start with 0x".to_string());
    }
    Address::from_str(hex)
        .map_err(|e| format!("Invalid address: {}", e))
}

/// Parse a hexadecimal transaction hash into a `TxHash`.
///
/// Expects a string starting with "0x" and 64 hex digits (32 bytes).
pub fn parse_hex_hash(hex: &str) -> Result<TxHash, String> {
    if !hex.starts_with("0x") {
        return Err("Transaction hash must start with 0x".to_string());
    }
    TxHash::from_str(hex)
        .map_err(|e| format!("Invalid transaction hash: {}", e))
}

/// Format an integer quantity the way JSON-RPC encodes it ("0x"-prefixed, no padding).
pub fn format_hex_quantity(value: u128) -> String {
    format!("0x{:x}", value)
}
