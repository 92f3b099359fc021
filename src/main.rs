use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .try_init();

    let config = mintshop::config::init();

    // Logged field by field so the signer key never lands in logs.
    tracing::info!(
        api_port = config.api_port,
        chain_id = config.chain_id,
        market_address = config.market_address.to_string(),
        rpc_url = config.rpc_url.to_string(),
        "Starting mintshop"
    );

    mintshop::run::start_services(&config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
