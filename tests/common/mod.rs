pub mod factories;

pub mod shop_build {
    use axum::Router;
    use mintshop::api;
    use mintshop::api::AppState;
    use mintshop::config::Config;
    use mintshop::market::Marketplace;
    use std::sync::Arc;

    pub fn make_test_router(config: &Config, market: Arc<dyn Marketplace>) -> Router {
        let router = api::router_with_defaults();
        let state = AppState::from(config, market);

        router.with_state(state)
    }
}

pub mod mock_market {
    use alloy::primitives::U256;
    use async_trait::async_trait;
    use mintshop::error::{Result, ShopError};
    use mintshop::market::{parse_price, MarketItem, Marketplace};
    use mintshop::types::TokenId;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedSale {
        pub token_uri: String,
        pub price: String,
        pub is_resale: bool,
        pub token_id: Option<TokenId>,
    }

    /// In-memory marketplace that records every submission it receives.
    /// With `fail_submissions` set it still records, then reverts.
    pub struct MockMarketplace {
        pub currency: String,
        pub items: Vec<MarketItem>,
        pub fail_submissions: bool,
        sales: Mutex<Vec<RecordedSale>>,
        purchases: Mutex<Vec<(TokenId, String)>>,
    }

    impl MockMarketplace {
        pub fn new() -> Self {
            Self {
                currency: "ETH".to_string(),
                items: Vec::new(),
                fail_submissions: false,
                sales: Mutex::new(Vec::new()),
                purchases: Mutex::new(Vec::new()),
            }
        }

        pub fn with_items(items: Vec<MarketItem>) -> Self {
            Self {
                items,
                ..Self::new()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_submissions: true,
                ..Self::new()
            }
        }

        pub fn recorded_sales(&self) -> Vec<RecordedSale> {
            self.sales.lock().unwrap().clone()
        }

        pub fn recorded_purchases(&self) -> Vec<(TokenId, String)> {
            self.purchases.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Marketplace for MockMarketplace {
        fn currency(&self) -> &str {
            &self.currency
        }

        async fn listing_price(&self) -> Result<U256> {
            Ok(U256::from(25_000_000_000_000_000u64))
        }

        async fn create_sale(
            &self,
            token_uri: &str,
            price: &str,
            is_resale: bool,
            token_id: Option<&TokenId>,
        ) -> Result<()> {
            // same validation the real marketplace applies before sending
            parse_price(price)?;

            self.sales.lock().unwrap().push(RecordedSale {
                token_uri: token_uri.to_string(),
                price: price.to_string(),
                is_resale,
                token_id: token_id.cloned(),
            });

            if self.fail_submissions {
                return Err(ShopError::TransactionFailure(
                    "mock: transaction reverted".to_string(),
                ));
            }
            Ok(())
        }

        async fn buy_token(&self, token_id: &TokenId, price: &str) -> Result<()> {
            parse_price(price)?;

            self.purchases
                .lock()
                .unwrap()
                .push((token_id.clone(), price.to_string()));

            if self.fail_submissions {
                return Err(ShopError::TransactionFailure(
                    "mock: transaction reverted".to_string(),
                ));
            }
            Ok(())
        }

        async fn market_items(&self) -> Result<Vec<MarketItem>> {
            Ok(self.items.clone())
        }
    }
}

pub mod metadata_server {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    /// Serves one metadata document on a random local port and returns its
    /// URL.
    pub async fn serve_metadata(document: Value) -> String {
        let (url, _hits) = serve_counted(document).await;
        url
    }

    /// Same as `serve_metadata`, but also returns a hit counter so tests can
    /// assert how many times the document was fetched.
    pub async fn serve_counted(document: Value) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();

        let router = Router::new().route(
            "/meta.json",
            get(move || {
                let document = document.clone();
                let hits = handler_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(document)
                }
            }),
        );

        (serve(router).await, hits)
    }

    /// Serves a fixed status and body, for broken-upstream cases.
    pub async fn serve_raw(status: StatusCode, body: &'static str) -> String {
        let router = Router::new().route("/meta.json", get(move || async move { (status, body) }));

        serve(router).await
    }

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}/meta.json", addr)
    }
}
