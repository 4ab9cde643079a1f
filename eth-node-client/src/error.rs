use alloy::transports::{RpcError, TransportError};
use thiserror::Error;

/// Errors raised by the node client
///
/// Once a client exists every failed call surfaces as [`NodeError::Rpc`]:
/// node-side error responses, HTTP failures and undecodable payloads are not
/// told apart.
#[derive(Error, Debug)]
pub enum NodeError {
    /// A JSON-RPC call failed
    #[error("Error getting {what}: {message}")]
    Rpc {
        /// What the call was fetching (e.g. "balance", "block number")
        what: &'static str,

        /// Message reported by the node or the transport
        message: String,
    },

    /// The client could not be built for the configured endpoint
    #[error("Invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),
}

impl NodeError {
    /// Translate a transport-level failure for the call fetching `what`
    ///
    /// Error responses keep the node's message exactly as sent.
    pub(crate) fn rpc(what: &'static str, err: TransportError) -> Self {
        let message = match err {
            RpcError::ErrorResp(payload) => payload.message.to_string(),
            other => other.to_string(),
        };
        NodeError::Rpc { what, message }
    }

    /// The underlying message, without the operation prefix
    pub fn message(&self) -> &str {
        match self {
            NodeError::Rpc { message, .. } => message,
            NodeError::InvalidEndpoint(message) => message,
        }
    }
}

pub type Result<T, E = NodeError> = std::result::Result<T, E>;
