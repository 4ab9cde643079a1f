use std::sync::Arc;

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder},
    rpc::{
        client::RpcClient,
        types::{Block, BlockId, BlockNumberOrTag, Transaction, TransactionReceipt},
    },
    transports::http::{reqwest, Http},
};
use tracing::{debug, info, instrument};

use crate::{
    config::Config,
    error::{NodeError, Result},
    units::Ether,
};

/// Ethereum node client
///
/// Owns a single HTTP connection to a JSON-RPC endpoint. Every method maps
/// to exactly one RPC call; nothing is cached, batched or retried.
pub struct NodeClient {
    rpc_url: String,
    /// Typed provider for Ethereum network
    provider: Arc<dyn Provider<Ethereum>>,
}

impl NodeClient {
    /// Create a client for `rpc_url` with default timeouts
    ///
    /// No request is sent until the first query.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - URL of the Ethereum RPC endpoint
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - New client, or `InvalidEndpoint` if the URL does not parse
    pub fn connect(rpc_url: &str) -> Result<Self> {
        Self::new(&Config::for_url(rpc_url))
    }

    /// Create a client with explicit transport settings
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint plus request and connect timeouts
    pub fn new(config: &Config) -> Result<Self> {
        let url = config
            .ethereum_rpc_url
            .parse::<reqwest::Url>()
            .map_err(|e| NodeError::InvalidEndpoint(format!("{}: {e}", config.ethereum_rpc_url)))?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| NodeError::InvalidEndpoint(e.to_string()))?;

        let transport = Http::with_client(http_client, url);
        let is_local = transport.guess_local();
        let provider = ProviderBuilder::new()
            .network::<Ethereum>()
            .on_client(RpcClient::new(transport, is_local));

        info!(
            rpc_url = %config.ethereum_rpc_url,
            request_timeout = ?config.request_timeout,
            connect_timeout = ?config.connect_timeout,
            "node client ready"
        );

        Ok(Self {
            rpc_url: config.ethereum_rpc_url.clone(),
            provider: Arc::new(provider),
        })
    }

    /// Endpoint this client talks to
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// ETH balance of `address` at the latest block
    ///
    /// # Arguments
    ///
    /// * `address` - Account or contract to query
    ///
    /// # Returns
    ///
    /// * `Result<Ether>` - The balance, converted from the node's wei value
    #[instrument(skip(self), err)]
    pub async fn get_balance(&self, address: Address) -> Result<Ether> {
        let wei = self
            .provider
            .get_balance(address)
            .block_id(BlockId::Number(BlockNumberOrTag::Latest))
            .await
            .map_err(|e| NodeError::rpc("balance", e))?;
        debug!(%wei, "fetched balance");
        Ok(Ether::from_wei(wei))
    }

    /// Number of the most recent block
    #[instrument(skip(self), err)]
    pub async fn get_block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| NodeError::rpc("block number", e))
    }

    /// Chain ID of the network the node serves (1 for mainnet)
    #[instrument(skip(self), err)]
    pub async fn get_chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| NodeError::rpc("chain ID", e))
    }

    /// Transaction by hash
    ///
    /// # Arguments
    ///
    /// * `hash` - Transaction hash
    ///
    /// # Returns
    ///
    /// * `Result<Option<Transaction>>` - The transaction, or `None` when the node does not know it
    #[instrument(skip(self), err)]
    pub async fn get_transaction(&self, hash: TxHash) -> Result<Option<Transaction>> {
        let transaction = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| NodeError::rpc("transaction", e))?;
        debug!(found = transaction.is_some(), "fetched transaction");
        Ok(transaction)
    }

    /// Receipt by transaction hash, `None` when unknown or still pending
    #[instrument(skip(self), err)]
    pub async fn get_transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| NodeError::rpc("receipt", e))?;
        debug!(found = receipt.is_some(), "fetched receipt");
        Ok(receipt)
    }

    /// Block by number with transaction hashes only
    ///
    /// # Arguments
    ///
    /// * `number` - Block height
    ///
    /// # Returns
    ///
    /// * `Result<Option<Block>>` - The block, or `None` when it does not exist yet
    #[instrument(skip(self), err)]
    pub async fn get_block(&self, number: u64) -> Result<Option<Block>> {
        // get_block_by_number defaults to hashes-only, matching `false` on the wire
        self.provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(|e| NodeError::rpc("block", e))
    }

    /// Whether `address` holds contract code at the latest block
    ///
    /// The node reports `"0x"` for accounts without code.
    #[instrument(skip(self), err)]
    pub async fn is_contract(&self, address: Address) -> Result<bool> {
        let code = self.get_code(address).await?;
        Ok(!code.is_empty())
    }

    /// Size in bytes of the code deployed at `address`, zero for plain accounts
    #[instrument(skip(self), err)]
    pub async fn get_code_size(&self, address: Address) -> Result<usize> {
        Ok(self.get_code(address).await?.len())
    }

    /// Current gas price in wei
    #[instrument(skip(self), err)]
    pub async fn get_gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| NodeError::rpc("gas price", e))
    }

    /// Node client identifier (`web3_clientVersion`)
    #[instrument(skip(self), err)]
    pub async fn get_network_version(&self) -> Result<String> {
        self.provider
            .get_client_version()
            .await
            .map_err(|e| NodeError::rpc("client version", e))
    }

    /// Release the connection
    ///
    /// Consumes the client, so it can only happen once.
    pub fn shutdown(self) {
        info!(rpc_url = %self.rpc_url, "shutting down node client");
        drop(self.provider);
    }

    async fn get_code(&self, address: Address) -> Result<alloy::primitives::Bytes> {
        self.provider
            .get_code_at(address)
            .block_id(BlockId::Number(BlockNumberOrTag::Latest))
            .await
            .map_err(|e| NodeError::rpc("code", e))
    }
}
