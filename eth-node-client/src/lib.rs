// Export modules for the binary and the integration tests
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod rpc;
pub mod units;

pub use error::{NodeError, Result};
pub use rpc::NodeClient;
