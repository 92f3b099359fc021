use crate::api::AppState;
use crate::error::ShopError;
use crate::pages::home::{HomePage, HomeView};
use crate::pages::resell::{ResellPage, ResellQuery, ResellState, ResellView};
use crate::types::{Route, TokenId};
use alloy::primitives::Address;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    pub seller: Option<String>,
}

pub async fn market(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<HomeView>, (StatusCode, String)> {
    let seller = match params.seller.as_deref() {
        Some(raw) => match Address::from_str(raw) {
            Ok(address) => Some(address),
            Err(_e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    "Invalid seller address".to_string(),
                ));
            }
        },
        None => None,
    };

    let page = HomePage::new(state.market.clone(), state.metadata.clone());
    match page.load(&state.view, seller).await {
        Ok(view) => Ok(Json(view)),
        Err(_e) => {
            tracing::warn!("Failed to load market listings: {:?}", _e);

            Err((
                StatusCode::BAD_GATEWAY,
                "Failed to load market listings".to_string(),
            ))
        }
    }
}

/// Renders the resell page for the given query parameters. Always responds
/// 200 with the current page state; fetch failures are a renderable state,
/// not a transport error.
pub async fn resell_view(
    State(state): State<AppState>,
    Query(query): Query<ResellQuery>,
) -> Json<ResellView> {
    let mut page = ResellPage::new(state.market.clone(), state.metadata.clone(), query);
    page.load().await;
    Json(page.render())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellSubmission {
    pub token_id: TokenId,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    pub price: String,
}

/// Route for handling resale submission
pub async fn resell_submit(
    State(state): State<AppState>,
    Json(submission): Json<ResellSubmission>,
) -> (StatusCode, Json<APIResponse>) {
    let query = ResellQuery {
        token_id: Some(submission.token_id),
        token_uri: Some(submission.token_uri),
    };
    let mut page = ResellPage::resume(
        state.market.clone(),
        state.metadata.clone(),
        query,
        &submission.price,
    );

    match page.submit().await {
        ResellState::Navigated { to } => (
            StatusCode::OK,
            Json(APIResponse::Navigated {
                to: to.path().to_string(),
            }),
        ),
        ResellState::Ready {
            last_error: Some(error),
            ..
        } => (
            error_status(error),
            Json(APIResponse::Error {
                message: error.to_string(),
            }),
        ),
        other => {
            tracing::warn!("Unexpected resale submission state: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(APIResponse::Error {
                    message: "Unexpected submission state".to_string(),
                }),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuySubmission {
    pub token_id: TokenId,
    pub price: String,
}

pub async fn buy(
    State(state): State<AppState>,
    Json(submission): Json<BuySubmission>,
) -> (StatusCode, Json<APIResponse>) {
    match state
        .market
        .buy_token(&submission.token_id, &submission.price)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(APIResponse::Navigated {
                to: Route::Home.path().to_string(),
            }),
        ),
        Err(error) => {
            tracing::warn!("Failed to buy token: {:?}", error);
            (
                error_status(&error),
                Json(APIResponse::Error {
                    message: error.to_string(),
                }),
            )
        }
    }
}

fn error_status(error: &ShopError) -> StatusCode {
    match error {
        ShopError::PriceParseError(_)
        | ShopError::TransactionSetupError(_)
        | ShopError::MetadataValidationError(_) => StatusCode::BAD_REQUEST,
        ShopError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ShopError::MetadataFetchError(_)
        | ShopError::RpcRequestError(_)
        | ShopError::TransactionError(_)
        | ShopError::TransactionFailure(_) => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Serialize)]
pub enum APIResponse {
    Navigated { to: String },
    Error { message: String },
}
