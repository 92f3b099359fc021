pub mod routes;

use crate::config::Config;
use crate::market::Marketplace;
use crate::metadata::MetadataClient;
use crate::view::ViewContext;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::{BoxError, ServiceBuilder};

#[derive(Clone)]
pub struct AppState {
    pub market: Arc<dyn Marketplace>,
    pub metadata: MetadataClient,
    pub view: ViewContext,
}

impl AppState {
    pub fn from(config: &Config, market: Arc<dyn Marketplace>) -> Self {
        let view = ViewContext::new(
            market.currency().to_string(),
            config.image_domains(),
            config.asset_path.clone(),
            config.asset_count,
        );

        Self {
            market,
            metadata: MetadataClient::new(),
            view,
        }
    }
}

pub fn router_with_defaults() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health))
        .route("/market", get(routes::market))
        .route(
            "/resell-nft",
            get(routes::resell_view).post(routes::resell_submit),
        )
        .route("/buy-nft", post(routes::buy))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|error: BoxError| async move {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled error: {:?}", error),
                    )
                }))
                .layer(BufferLayer::new(10000))
                .layer(RateLimitLayer::new(60, Duration::from_secs(60))),
        )
        // No timeout layer here: a resale submission legitimately waits on a
        // transaction receipt, which can outlive any sane request timeout.
        .layer(
            ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::cors::CorsLayer::new().allow_origin(tower_http::cors::Any))
                .layer(tower_http::compression::CompressionLayer::new().gzip(true)),
        )
}

pub async fn start_api(
    config: &Config,
    market: Arc<dyn Marketplace>,
    router: Router<AppState>,
) -> eyre::Result<()> {
    let app_state = AppState::from(config, market);
    let router = router.with_state(app_state);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr.clone()).await?;

    tracing::info!(address = addr, "Starting API server");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("API Server failed");
    });
    Ok(())
}
