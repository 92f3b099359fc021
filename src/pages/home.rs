use crate::error::Result;
use crate::market::{MarketItem, Marketplace};
use crate::metadata::MetadataClient;
use crate::types::{NftRecord, TokenId};
use crate::view::{format_price, BannerView, CardView, NftCard, ViewContext};
use alloy::primitives::Address;
use serde::Serialize;
use std::sync::Arc;

const MARKET_BANNER: &str = "Discover, collect, and sell extraordinary NFTs";
const PROFILE_BANNER: &str = "Your Nifty NFTs";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HomeView {
    pub banner: BannerView,
    pub cards: Vec<CardView>,
}

/// Market listing page: joins on-chain listings with their metadata
/// documents and renders one card per listing. With a seller filter it
/// becomes that seller's profile view.
pub struct HomePage<M: Marketplace + ?Sized> {
    market: Arc<M>,
    metadata: MetadataClient,
}

impl<M: Marketplace + ?Sized> HomePage<M> {
    pub fn new(market: Arc<M>, metadata: MetadataClient) -> Self {
        Self { market, metadata }
    }

    pub async fn load(
        &self,
        ctx: &ViewContext,
        seller_filter: Option<Address>,
    ) -> Result<HomeView> {
        let mut items = self.market.market_items().await?;
        if let Some(seller) = seller_filter {
            items.retain(|item| item.seller == seller);
        }

        let on_profile_page = seller_filter.is_some();
        let records = futures::future::join_all(
            items
                .iter()
                .enumerate()
                .map(|(position, item)| self.record_for(item, position as u32 + 1)),
        )
        .await;
        let cards = records
            .iter()
            .map(|record| NftCard::new(record, on_profile_page).render(ctx))
            .collect();

        let banner = if on_profile_page {
            BannerView::new(PROFILE_BANNER)
        } else {
            BannerView::new(MARKET_BANNER)
        };

        Ok(HomeView { banner, cards })
    }

    /// Builds the record for one listing. `position` is the 1-based slot in
    /// the listing, used to cycle the local fallback images. A metadata
    /// fetch failure degrades to the on-chain fields alone rather than
    /// failing the whole page.
    async fn record_for(&self, item: &MarketItem, position: u32) -> NftRecord {
        let (name, image) = match self.metadata.fetch(&item.token_uri).await {
            Ok(metadata) => (metadata.name, Some(metadata.image)),
            Err(error) => {
                tracing::warn!(
                    token_id = item.token_id.to_string(),
                    token_uri = item.token_uri,
                    error = error.to_string(),
                    "failed to load metadata for listing"
                );
                (None, None)
            }
        };

        NftRecord {
            token_id: TokenId(item.token_id.to_string()),
            name,
            price: format_price(item.price),
            image,
            owner: item.owner.to_string(),
            seller: item.seller.to_string(),
            i: Some(position),
        }
    }
}
