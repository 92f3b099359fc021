use crate::address::shorten;
use crate::types::{NftRecord, Route};
use alloy::primitives::utils::format_ether;
use alloy::primitives::U256;
use serde::Serialize;
use url::{form_urlencoded, Url};

/// Display settings shared by every rendered view: the market currency,
/// which remote image hosts may be rendered directly, and the local
/// placeholder assets used when a remote image cannot be.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub currency: String,
    pub image_domains: Vec<String>,
    pub asset_path: String,
    pub asset_count: u32,
}

impl ViewContext {
    pub fn new(
        currency: String,
        image_domains: Vec<String>,
        asset_path: String,
        asset_count: u32,
    ) -> Self {
        Self {
            currency,
            image_domains,
            asset_path,
            asset_count,
        }
    }

    /// True when the URL parses and its host is on the image allowlist.
    pub fn image_allowed(&self, image_url: &str) -> bool {
        let Ok(url) = Url::parse(image_url) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        self.image_domains.iter().any(|domain| domain == host)
    }

    /// Local placeholder image for a listing, cycling through the bundled
    /// assets by the listing's index.
    pub fn fallback_asset(&self, i: Option<u32>) -> String {
        let count = self.asset_count.max(1);
        let slot = (i.unwrap_or(1).saturating_sub(1) % count) + 1;
        format!("{}/nft{}.png", self.asset_path, slot)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BannerView {
    pub name: String,
}

impl BannerView {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// One listing card. `on_profile_page` switches the displayed address from
/// the seller to the owner, matching how a profile shows tokens you hold.
pub struct NftCard<'a> {
    pub nft: &'a NftRecord,
    pub on_profile_page: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub name: Option<String>,
    pub image: String,
    pub price_label: String,
    pub address: String,
    pub detail_href: String,
}

impl<'a> NftCard<'a> {
    pub fn new(nft: &'a NftRecord, on_profile_page: bool) -> Self {
        Self {
            nft,
            on_profile_page,
        }
    }

    pub fn render(&self, ctx: &ViewContext) -> CardView {
        let image = match self.nft.image.as_deref() {
            Some(url) if ctx.image_allowed(url) => url.to_string(),
            _ => ctx.fallback_asset(self.nft.i),
        };

        let address = if self.on_profile_page {
            shorten(&self.nft.owner)
        } else {
            shorten(&self.nft.seller)
        };

        CardView {
            name: self.nft.name.clone(),
            image,
            price_label: format!("{} {}", self.nft.price, ctx.currency),
            address,
            detail_href: self.detail_href(),
        }
    }

    /// Link to the detail page carrying the whole record in the query
    /// string, so the detail view renders without refetching.
    fn detail_href(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("tokenId", &self.nft.token_id.to_string());
        if let Some(name) = &self.nft.name {
            query.append_pair("name", name);
        }
        query.append_pair("price", &self.nft.price);
        if let Some(image) = &self.nft.image {
            query.append_pair("image", image);
        }
        query.append_pair("owner", &self.nft.owner);
        query.append_pair("seller", &self.nft.seller);
        if let Some(i) = self.nft.i {
            query.append_pair("i", &i.to_string());
        }
        format!("{}?{}", Route::NftDetails.path(), query.finish())
    }
}

/// Formats a wei amount as a decimal currency string with no trailing
/// zeros, e.g. `2500000000000000000` becomes "2.5".
pub fn format_price(wei: U256) -> String {
    let formatted = format_ether(wei);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
