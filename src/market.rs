use crate::error::{Result, ShopError};
use crate::types::TokenId;
use alloy::network::{Network, ReceiptResponse};
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol;
use alloy::transports::Transport;
use async_trait::async_trait;
use std::marker::PhantomData;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract NftMarket {
        struct MarketItem {
            uint256 tokenId;
            address seller;
            address owner;
            uint256 price;
            bool sold;
        }

        function getListingPrice() external view returns (uint256);

        function createToken(string memory tokenURI, uint256 price) external payable returns (uint256);

        function resellToken(uint256 tokenId, uint256 price) external payable;

        function createMarketSale(uint256 tokenId) external payable;

        function fetchMarketItems() external view returns (MarketItem[] memory);

        function tokenURI(uint256 tokenId) external view returns (string memory);
    }
}

/// A listed token as the storefront sees it, with the token URI already
/// resolved so callers can join metadata without further contract calls.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketItem {
    pub token_id: U256,
    pub seller: Address,
    pub owner: Address,
    pub price: U256,
    pub sold: bool,
    pub token_uri: String,
}

/// Everything pages need from the marketplace contract. Pages hold this as
/// `Arc<dyn Marketplace>` so tests can swap in a mock that records calls.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Display currency for prices, e.g. "ETH" or "MATIC".
    fn currency(&self) -> &str;

    /// Marketplace listing fee, paid as transaction value on every listing.
    async fn listing_price(&self) -> Result<U256>;

    /// Lists a token for sale. `is_resale` relists an existing token (which
    /// requires its id); otherwise a fresh token is minted from `token_uri`.
    /// `price` is a decimal amount in the marketplace currency, e.g. "2.5".
    async fn create_sale(
        &self,
        token_uri: &str,
        price: &str,
        is_resale: bool,
        token_id: Option<&TokenId>,
    ) -> Result<()>;

    /// Buys a listed token at its asking price.
    async fn buy_token(&self, token_id: &TokenId, price: &str) -> Result<()>;

    /// Returns all unsold listings with their token URIs resolved.
    async fn market_items(&self) -> Result<Vec<MarketItem>>;
}

/// Parses a decimal currency amount ("2.5") into wei.
pub fn parse_price(price: &str) -> Result<U256> {
    // parse_ether("") is Ok(0); a cleared price field must not list at 0 wei.
    if price.trim().is_empty() {
        return Err(ShopError::PriceParseError(
            "price must not be empty".to_string(),
        ));
    }
    parse_ether(price).map_err(|e| ShopError::PriceParseError(e.to_string()))
}

/// `Marketplace` backed by the NftMarket contract over an alloy provider.
#[derive(Clone)]
pub struct EvmMarketplace<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + Clone,
    N: Network + Clone,
{
    provider: P,
    market_address: Address,
    currency: String,
    phantom_data: PhantomData<(T, N)>,
}

impl<T, P, N> EvmMarketplace<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + Clone,
    N: Network + Clone,
{
    pub fn new(provider: P, market_address: Address, currency: String) -> Self {
        Self {
            provider,
            market_address,
            currency,
            phantom_data: PhantomData,
        }
    }

    fn contract(&self) -> NftMarket::NftMarketInstance<T, P, N> {
        NftMarket::new(self.market_address, self.provider.clone())
    }
}

#[async_trait]
impl<T, P, N> Marketplace for EvmMarketplace<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N> + Clone,
    N: Network + Clone,
{
    fn currency(&self) -> &str {
        &self.currency
    }

    async fn listing_price(&self) -> Result<U256> {
        let fee = self
            .contract()
            .getListingPrice()
            .call()
            .await
            .map_err(|e| ShopError::RpcRequestError(e.to_string()))?
            ._0;
        Ok(fee)
    }

    async fn create_sale(
        &self,
        token_uri: &str,
        price: &str,
        is_resale: bool,
        token_id: Option<&TokenId>,
    ) -> Result<()> {
        let price = parse_price(price)?;
        let fee = self.listing_price().await?;
        let contract = self.contract();

        let receipt = if is_resale {
            let token_id = token_id.ok_or_else(|| {
                ShopError::TransactionSetupError("resale requires a token id".to_string())
            })?;
            contract
                .resellToken(token_id.as_u256()?, price)
                .value(fee)
                .send()
                .await
                .map_err(|e| ShopError::TransactionError(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| ShopError::TransactionFailure(e.to_string()))?
        } else {
            contract
                .createToken(token_uri.to_string(), price)
                .value(fee)
                .send()
                .await
                .map_err(|e| ShopError::TransactionError(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| ShopError::TransactionFailure(e.to_string()))?
        };

        if !receipt.status() {
            return Err(ShopError::TransactionFailure(
                "transaction reverted".to_string(),
            ));
        }

        Ok(())
    }

    async fn buy_token(&self, token_id: &TokenId, price: &str) -> Result<()> {
        let price = parse_price(price)?;
        let receipt = self
            .contract()
            .createMarketSale(token_id.as_u256()?)
            .value(price)
            .send()
            .await
            .map_err(|e| ShopError::TransactionError(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ShopError::TransactionFailure(e.to_string()))?;

        if !receipt.status() {
            return Err(ShopError::TransactionFailure(
                "transaction reverted".to_string(),
            ));
        }

        Ok(())
    }

    async fn market_items(&self) -> Result<Vec<MarketItem>> {
        let contract = self.contract();
        let raw = contract
            .fetchMarketItems()
            .call()
            .await
            .map_err(|e| ShopError::RpcRequestError(e.to_string()))?
            ._0;

        let mut items = Vec::with_capacity(raw.len());
        for item in raw {
            let token_uri = contract
                .tokenURI(item.tokenId)
                .call()
                .await
                .map_err(|e| ShopError::RpcRequestError(e.to_string()))?
                ._0;
            items.push(MarketItem {
                token_id: item.tokenId,
                seller: item.seller,
                owner: item.owner,
                price: item.price,
                sold: item.sold,
                token_uri,
            });
        }

        Ok(items)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_price_whole_amount() {
        assert_eq!(
            parse_price("3").unwrap(),
            U256::from(3_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_price_fractional_amount() {
        assert_eq!(
            parse_price("2.5").unwrap(),
            U256::from(2_500_000_000_000_000_000u64)
        );
        assert_eq!(parse_price("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert!(matches!(
            parse_price("three"),
            Err(ShopError::PriceParseError(_))
        ));
        assert!(matches!(parse_price(""), Err(ShopError::PriceParseError(_))));
    }
}
