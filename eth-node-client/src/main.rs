use clap::Parser;
use eth_node_client::{
    cli::{self, Cli, Command},
    config::Config,
    rpc::NodeClient,
};
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// Sets up logging, loads configuration, connects to the node and runs the
/// requested query. The connection is shut down whether or not the query
/// succeeded.
#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Our crate at info, transport internals only when something is wrong
    let filter = EnvFilter::from_default_env()
        .add_directive("eth_node_client=info".parse()?)
        .add_directive("alloy_transport_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(rpc_url) = args.rpc {
        config.ethereum_rpc_url = rpc_url;
    }

    let client = NodeClient::new(&config)?;
    let command = args.command.unwrap_or(Command::Demo);

    let outcome = cli::run(&client, command, &mut std::io::stdout().lock()).await;
    client.shutdown();

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
