use crate::error::{Result, ShopError};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// On-chain token identifier, carried as the opaque string the router hands
/// us and parsed only at the contract boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub String);

impl TokenId {
    pub fn as_u256(&self) -> Result<U256> {
        U256::from_str(&self.0).map_err(|e| {
            ShopError::TransactionSetupError(format!("invalid token id {}: {}", self.0, e))
        })
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        TokenId(value.to_string())
    }
}

/// Client-side routes the storefront navigates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NftDetails,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::NftDetails => "/nft-details",
        }
    }
}

/// The record a card renders: on-chain listing fields joined with the
/// token's off-chain metadata. Detail links carry the whole record as query
/// parameters so the details view needs no second lookup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NftRecord {
    pub token_id: TokenId,
    pub name: Option<String>,
    /// Ether-denominated display price, already formatted.
    pub price: String,
    pub image: Option<String>,
    pub owner: String,
    pub seller: String,
    /// Index into the local fallback image set.
    pub i: Option<u32>,
}
