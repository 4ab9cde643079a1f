//! Data models used throughout the client
//!
//! Wire envelopes and hex parsing for JSON-RPC. The node-side record
//! types (blocks, transactions, receipts) come from `alloy`.

// JSON-RPC protocol data structures
pub mod jsonrpc;
