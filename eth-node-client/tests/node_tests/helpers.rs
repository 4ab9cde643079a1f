use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

use eth_node_client::{
    models::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcSuccess},
    rpc::NodeClient,
};
use mockito::{Matcher, Mock, Request, ServerGuard};
use serde_json::{json, Value};

/// In-process JSON-RPC node
///
/// Each mock answers one method. Responses echo the request id so the
/// client can pair them with its calls.
pub struct MockNode {
    server: ServerGuard,
}

impl MockNode {
    pub async fn start() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// A client pointed at this node
    pub fn client(&self) -> NodeClient {
        NodeClient::connect(&self.url()).expect("mock url is valid")
    }

    /// Answer every `method` call with `result`.
    pub async fn answer(&mut self, method: &str, result: Value) -> Mock {
        self.answer_matching(json!({ "method": method }), result).await
    }

    /// Answer calls whose body contains `body` with `result`.
    pub async fn answer_matching(&mut self, body: Value, result: Value) -> Mock {
        self.server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(body))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| {
                serde_json::to_vec(&JsonRpcSuccess::new(request_id(request), result.clone()))
                    .expect("result serializes")
            })
            .create_async()
            .await
    }

    /// Reply to `method` calls with a JSON-RPC error object.
    pub async fn reject(&mut self, method: &str, code: i64, message: &str) -> Mock {
        self.reject_matching(Matcher::PartialJson(json!({ "method": method })), code, message)
            .await
    }

    /// Reply to any call with a JSON-RPC error object.
    pub async fn reject_all(&mut self, code: i64, message: &str) -> Mock {
        self.reject_matching(Matcher::Any, code, message).await
    }

    async fn reject_matching(&mut self, body: Matcher, code: i64, message: &str) -> Mock {
        let message = message.to_string();
        self.server
            .mock("POST", "/")
            .match_body(body)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| {
                serde_json::to_vec(&JsonRpcError::new(request_id(request), code, message.clone()))
                    .expect("error serializes")
            })
            .create_async()
            .await
    }
}

pub const LEGACY_TX_HASH: &str =
    "0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222";
pub const EIP1559_TX_HASH: &str =
    "0x5d3b8a0c9e6f1a2b4c7d8e9f0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d";
pub const SENDER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const RECIPIENT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const BLOCK_HASH: &str = "0x9b83c12c69edb74f6c8dd5d052765c1adf940e320bd1291696e6fa07829eee71";

const SIG_R: &str = "0x88ff6cf0fefd94db46111149ae4bfc179e9b94721fffd821d38d16464b3f71d0";
const SIG_S: &str = "0x45e0aff800961cfce805daef7016b9b675c137a6a41a548f7b60a3484c06a33a";

/// Mined legacy transfer of 1 ETH at 20 gwei, chain 1, block 16.
pub fn legacy_transaction() -> Value {
    json!({
        "type": "0x0",
        "hash": LEGACY_TX_HASH,
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x10",
        "transactionIndex": "0x0",
        "from": SENDER,
        "to": RECIPIENT,
        "nonce": "0x9",
        "gas": "0x5208",
        "gasPrice": "0x4a817c800",
        "value": "0xde0b6b3a7640000",
        "input": "0x",
        "chainId": "0x1",
        "v": "0x25",
        "r": SIG_R,
        "s": SIG_S
    })
}

/// Mined EIP-1559 contract deployment, 30 gwei max fee, block 17.
pub fn eip1559_deployment() -> Value {
    json!({
        "type": "0x2",
        "hash": EIP1559_TX_HASH,
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x11",
        "transactionIndex": "0x1",
        "from": SENDER,
        "to": null,
        "nonce": "0x0",
        "gas": "0x7a120",
        "maxFeePerGas": "0x6fc23ac00",
        "maxPriorityFeePerGas": "0x3b9aca00",
        "value": "0x0",
        "input": "0x6080604052",
        "accessList": [],
        "chainId": "0x1",
        "v": "0x1",
        "yParity": "0x1",
        "r": SIG_R,
        "s": SIG_S
    })
}

/// Receipt for `hash` with the given envelope type and status (`"0x1"` success, `"0x0"` failure).
pub fn receipt(hash: &str, tx_type: &str, status: &str) -> Value {
    json!({
        "type": tx_type,
        "status": status,
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x10",
        "from": SENDER,
        "to": RECIPIENT,
        "contractAddress": null,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x4a817c800",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512))
    })
}

/// Block 16 with two transaction hashes, 21000 of 30M gas used.
pub fn block_with_hashes() -> Value {
    json!({
        "hash": BLOCK_HASH,
        "parentHash": "0x1e77d8f1267348b516ebc4f4da1e2aa59f85f0cbd853949500ffac8bfc38ba14",
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": RECIPIENT,
        "stateRoot": "0xd7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544",
        "transactionsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "receiptsRoot": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "difficulty": "0x0",
        "number": "0x10",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "timestamp": "0x65f0a1b2",
        "extraData": "0x",
        "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x7",
        "uncles": [],
        "transactions": [LEGACY_TX_HASH, EIP1559_TX_HASH]
    })
}

fn request_id(request: &Request) -> Value {
    request
        .body()
        .ok()
        .and_then(|body| serde_json::from_slice::<JsonRpcRequest<Value>>(body).ok())
        .map(|request| request.id)
        .unwrap_or(Value::Null)
}

/// Spawns an Anvil process on a free port and returns the process handle and the RPC URL.
///
/// # Panics
///
/// Panics if it fails to bind to a free port or spawn Anvil.
pub fn spawn_anvil() -> (Child, String) {
    // Bind to a free port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let rpc_url = format!("http://127.0.0.1:{}", port);

    let child = Command::new("anvil")
        .arg("-p")
        .arg(port.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn anvil");

    // Wait a moment to ensure Anvil is up and running
    sleep(Duration::from_secs(1));

    (child, rpc_url)
}
