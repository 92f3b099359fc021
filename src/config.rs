use crate::error::{Result, ShopError};
use alloy::primitives::Address;
use envconfig::Envconfig;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;

/// Default display currency per chain id, used when `CURRENCY` is not set.
pub static CHAIN_CURRENCIES: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "ETH"),
        (137, "MATIC"),
        (1337, "ETH"),
        (11155111, "ETH"),
    ])
});

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "API_PORT", default = "3000")]
    pub api_port: u64,

    #[envconfig(from = "RPC_URL", default = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    #[envconfig(from = "CHAIN_ID", default = "1337")]
    pub chain_id: u64,

    // Address of the deployed NftMarket contract. Required.
    #[envconfig(from = "MARKET_ADDRESS")]
    pub market_address: String,

    // Private key used to sign listing and purchase transactions. Without it
    // the service starts read-only and submissions fail at send time.
    #[envconfig(from = "SIGNER_KEY")]
    pub signer_key: Option<String>,

    #[envconfig(from = "CURRENCY")]
    pub currency: Option<String>,

    // Comma separated list of hosts whose images may be rendered directly.
    #[envconfig(from = "IMAGE_DOMAINS", default = "mfipo.infura-ipfs.io")]
    pub image_domains: String,

    #[envconfig(from = "ASSET_PATH", default = "/assets")]
    pub asset_path: String,

    #[envconfig(from = "ASSET_COUNT", default = "10")]
    pub asset_count: u32,
}

impl Config {
    pub fn test_default() -> Self {
        Config {
            api_port: 0,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: 1337,
            market_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            signer_key: None,
            currency: Some("ETH".to_string()),
            image_domains: "mfipo.infura-ipfs.io".to_string(),
            asset_path: "/assets".to_string(),
            asset_count: 10,
        }
    }

    pub fn market_address(&self) -> Result<Address> {
        Address::from_str(&self.market_address)
            .map_err(|e| ShopError::ConfigError(format!("invalid MARKET_ADDRESS: {e}")))
    }

    pub fn currency(&self) -> String {
        match &self.currency {
            Some(currency) => currency.clone(),
            None => CHAIN_CURRENCIES
                .get(&self.chain_id)
                .copied()
                .unwrap_or("ETH")
                .to_string(),
        }
    }

    pub fn image_domains(&self) -> Vec<String> {
        self.image_domains
            .split(',')
            .map(|domain| domain.trim().to_string())
            .filter(|domain| !domain.is_empty())
            .collect()
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.api_port)
    }
}

pub fn init() -> Config {
    Config::init_from_env().expect("Failed to load config")
}
