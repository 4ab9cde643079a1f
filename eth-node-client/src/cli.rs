use std::io::Write;

use alloy::{
    consensus::Transaction as TxFields,
    network::{ReceiptResponse, TransactionResponse},
    primitives::{Address, TxHash, U256},
};
use clap::{Parser, Subcommand};
use eyre::Result;

use crate::{
    models::jsonrpc::{parse_hex_address, parse_hex_hash},
    rpc::NodeClient,
    units::{gas_cost, Ether, Gwei, TOKEN_TRANSFER_GAS, TRANSFER_GAS},
};

/// Account queried by the demo run
pub const DEMO_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

/// Query an Ethereum node over JSON-RPC.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// RPC endpoint URL (overrides ETHEREUM_RPC_URL).
    #[arg(long, global = true)]
    pub rpc: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chain ID, latest block, a balance, gas price and client version in one go.
    Demo,
    /// ETH balance of an address.
    Balance {
        #[arg(value_parser = parse_hex_address)]
        address: Address,
    },
    /// Transaction details and receipt status.
    Tx {
        #[arg(value_parser = parse_hex_hash)]
        hash: TxHash,
    },
    /// Block summary (latest when no number is given).
    Block { number: Option<u64> },
    /// Current gas price and typical transaction costs.
    Gas,
    /// Whether an address is a contract or an externally owned account.
    Contract {
        #[arg(value_parser = parse_hex_address)]
        address: Address,
    },
}

/// Execute `command` against `client`, writing the report to `out`
pub async fn run(client: &NodeClient, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Demo => demo(client, out).await,
        Command::Balance { address } => balance(client, address, out).await,
        Command::Tx { hash } => transaction(client, hash, out).await,
        Command::Block { number } => block(client, number, out).await,
        Command::Gas => gas(client, out).await,
        Command::Contract { address } => contract(client, address, out).await,
    }
}

async fn demo(client: &NodeClient, out: &mut impl Write) -> Result<()> {
    writeln!(out, "=== Blockchain Service Demo ===")?;
    writeln!(out, "Endpoint: {}\n", client.rpc_url())?;

    let chain_id = client.get_chain_id().await?;
    writeln!(out, "Chain ID: {chain_id}")?;

    let block_number = client.get_block_number().await?;
    writeln!(out, "Latest Block: {block_number}")?;

    let address = parse_hex_address(DEMO_ADDRESS).map_err(|e| eyre::eyre!(e))?;
    let balance = client.get_balance(address).await?;
    writeln!(out, "Balance: {balance} ETH")?;

    let is_contract = client.is_contract(address).await?;
    writeln!(out, "Is Contract: {is_contract}")?;

    let gas_price = client.get_gas_price().await?;
    writeln!(out, "Gas Price: {} Gwei", Gwei::from_wei(U256::from(gas_price)))?;

    let version = client.get_network_version().await?;
    writeln!(out, "Client Version: {version}")?;
    Ok(())
}

async fn balance(client: &NodeClient, address: Address, out: &mut impl Write) -> Result<()> {
    let balance = client.get_balance(address).await?;
    writeln!(out, "Balance for {address}")?;
    writeln!(out, "   {balance} ETH")?;
    writeln!(out, "   {} Wei", balance.wei())?;
    Ok(())
}

async fn transaction(client: &NodeClient, hash: TxHash, out: &mut impl Write) -> Result<()> {
    let Some(tx) = client.get_transaction(hash).await? else {
        writeln!(out, "Transaction {hash} not found")?;
        return Ok(());
    };
    let receipt = client.get_transaction_receipt(hash).await?;

    let to = TxFields::to(&tx)
        .map_or_else(|| "contract creation".to_string(), |to| to.to_string());
    let gas_price = TxFields::gas_price(&tx).unwrap_or_else(|| TxFields::max_fee_per_gas(&tx));
    let block = tx
        .block_number
        .map_or_else(|| "pending".to_string(), |number| number.to_string());
    let status = match &receipt {
        Some(receipt) if ReceiptResponse::status(receipt) => "Success",
        Some(_) => "Failed",
        None => "Pending",
    };

    writeln!(out, "Transaction: {hash}")?;
    writeln!(out, "   From:      {}", TransactionResponse::from(&tx))?;
    writeln!(out, "   To:        {to}")?;
    writeln!(out, "   Value:     {} ETH", Ether::from_wei(TxFields::value(&tx)))?;
    writeln!(out, "   Gas:       {}", TxFields::gas_limit(&tx))?;
    writeln!(out, "   Gas Price: {} Gwei", Gwei::from_wei(U256::from(gas_price)))?;
    writeln!(out, "   Block:     {block}")?;
    writeln!(out, "   Status:    {status}")?;
    Ok(())
}

async fn block(client: &NodeClient, number: Option<u64>, out: &mut impl Write) -> Result<()> {
    let number = match number {
        Some(number) => number,
        None => client.get_block_number().await?,
    };
    let Some(block) = client.get_block(number).await? else {
        writeln!(out, "Block #{number} not found")?;
        return Ok(());
    };

    writeln!(out, "Block #{number}")?;
    writeln!(out, "   Hash:         {}", block.header.hash)?;
    writeln!(out, "   Timestamp:    {}", block.header.timestamp)?;
    writeln!(out, "   Transactions: {}", block.transactions.len())?;
    writeln!(out, "   Gas Used:     {}", block.header.gas_used)?;
    writeln!(out, "   Gas Limit:    {}", block.header.gas_limit)?;
    Ok(())
}

async fn gas(client: &NodeClient, out: &mut impl Write) -> Result<()> {
    let gas_price = client.get_gas_price().await?;

    writeln!(out, "Current Gas Price")?;
    writeln!(out, "   {} Gwei", Gwei::from_wei(U256::from(gas_price)))?;
    writeln!(out, "   {gas_price} Wei")?;
    writeln!(out, "Estimated Transaction Costs:")?;
    writeln!(
        out,
        "   Simple Transfer ({TRANSFER_GAS} gas): {} ETH",
        gas_cost(TRANSFER_GAS, gas_price)
    )?;
    writeln!(
        out,
        "   Token Transfer ({TOKEN_TRANSFER_GAS} gas):  {} ETH",
        gas_cost(TOKEN_TRANSFER_GAS, gas_price)
    )?;
    Ok(())
}

async fn contract(client: &NodeClient, address: Address, out: &mut impl Write) -> Result<()> {
    let code_size = client.get_code_size(address).await?;

    writeln!(out, "Address Analysis: {address}")?;
    if code_size > 0 {
        writeln!(out, "   Type: Smart Contract")?;
        writeln!(out, "   Code Size: {code_size} bytes")?;
    } else {
        writeln!(out, "   Type: EOA (Externally Owned Account)")?;
    }
    Ok(())
}
