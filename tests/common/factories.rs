use alloy::primitives::{Address, U256};
use mintshop::market::MarketItem;
use mintshop::metadata::TokenMetadata;
use rand::{Rng, RngCore};

pub trait Factory<O>
where
    Self: Sized,
    O: Default,
{
    fn build(options: O) -> Self;
    fn build_default() -> Self {
        Self::build(O::default())
    }
}

#[derive(Default)]
pub struct MarketItemOptions {
    pub token_id: Option<u64>,
    pub seller: Option<Address>,
    pub owner: Option<Address>,
    pub price: Option<U256>,
    pub token_uri: Option<String>,
}

impl Factory<MarketItemOptions> for MarketItem {
    fn build(options: MarketItemOptions) -> Self {
        let mut rng = rand::thread_rng();
        let token_id = options.token_id.unwrap_or(rng.gen_range(1..10_000));

        Self {
            token_id: U256::from(token_id),
            seller: options
                .seller
                .unwrap_or(Address::from(rng.gen::<[u8; 20]>())),
            owner: options.owner.unwrap_or(Address::from(rng.gen::<[u8; 20]>())),
            price: options.price.unwrap_or(U256::from(rng.next_u64())),
            sold: false,
            token_uri: options
                .token_uri
                .unwrap_or(format!("http://example.com/meta/{}.json", token_id)),
        }
    }
}

#[derive(Default)]
pub struct TokenMetadataOptions {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}

impl Factory<TokenMetadataOptions> for TokenMetadata {
    fn build(options: TokenMetadataOptions) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            name: Some(
                options
                    .name
                    .unwrap_or(format!("Token #{}", rng.gen_range(1..1000))),
            ),
            description: None,
            image: options
                .image
                .unwrap_or("https://mfipo.infura-ipfs.io/ipfs/QmExample".to_string()),
            price: options.price.unwrap_or("1.5".to_string()),
        }
    }
}
