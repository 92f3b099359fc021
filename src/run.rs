use crate::api;
use crate::config::Config;
use crate::market::{EvmMarketplace, Marketplace};
use alloy::network::EthereumWallet;
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use eyre::WrapErr;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

/// Wires the marketplace provider to the API server and starts serving.
pub async fn start_services(config: &Config) -> eyre::Result<()> {
    let market = make_marketplace(config)?;
    let router = api::router_with_defaults();
    api::start_api(config, market, router).await?;

    Ok(())
}

/// Builds the on-chain marketplace from config. With a signer key the
/// provider can send listing and purchase transactions; without one the
/// marketplace is read-only.
pub fn make_marketplace(config: &Config) -> eyre::Result<Arc<dyn Marketplace>> {
    let rpc_url = Url::parse(&config.rpc_url).wrap_err("Invalid RPC_URL")?;
    let market_address = config.market_address()?;
    let currency = config.currency();

    match &config.signer_key {
        Some(key) => {
            let signer = PrivateKeySigner::from_str(key).wrap_err("Invalid SIGNER_KEY")?;
            let wallet = EthereumWallet::new(signer);
            let provider = ProviderBuilder::new()
                .with_recommended_fillers()
                .wallet(wallet)
                .on_http(rpc_url);
            Ok(Arc::new(EvmMarketplace::new(
                provider,
                market_address,
                currency,
            )))
        }
        None => {
            let provider = ProviderBuilder::new()
                .with_recommended_fillers()
                .on_http(rpc_url);
            Ok(Arc::new(EvmMarketplace::new(
                provider,
                market_address,
                currency,
            )))
        }
    }
}
