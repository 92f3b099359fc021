use crate::error::ShopError;
use crate::market::Marketplace;
use crate::metadata::MetadataClient;
use crate::types::{Route, TokenId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters the resell page is opened with. Both are optional:
/// a page can be reached before routing has resolved them, in which case
/// it stays in `Loading` until hydrated with a token URI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellQuery {
    pub token_id: Option<TokenId>,
    #[serde(rename = "tokenURI")]
    pub token_uri: Option<String>,
}

/// The editable resale form. `price` starts from the token's current
/// metadata price and is the only field the user changes; `image` is
/// display-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResellForm {
    pub price: String,
    pub image: String,
}

/// Lifecycle of one resale flow. Legal transitions:
/// `Loading -> Ready | Failed`, `Ready -> Submitting`,
/// `Submitting -> Navigated | Ready` (back to `Ready` with the error kept
/// so the user can correct and resubmit). Everything else is a no-op.
#[derive(Debug)]
pub enum ResellState {
    Loading,
    Ready {
        form: ResellForm,
        last_error: Option<ShopError>,
    },
    Submitting {
        form: ResellForm,
    },
    Navigated {
        to: Route,
    },
    Failed {
        error: ShopError,
    },
}

/// What the resell page renders, one variant per visible screen.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ResellView {
    Loading,
    Form {
        price: String,
        image: String,
        error: Option<String>,
    },
    Submitting,
    Navigated {
        to: String,
    },
    Failed {
        error: String,
    },
}

/// Controller for the resale flow: fetch the token's metadata, let the
/// user set a new price, relist through the marketplace, then navigate
/// home. Generic over the marketplace so tests can inject a recording
/// mock.
pub struct ResellPage<M: Marketplace + ?Sized> {
    market: Arc<M>,
    metadata: MetadataClient,
    query: ResellQuery,
    state: ResellState,
}

impl<M: Marketplace + ?Sized> ResellPage<M> {
    pub fn new(market: Arc<M>, metadata: MetadataClient, query: ResellQuery) -> Self {
        Self {
            market,
            metadata,
            query,
            state: ResellState::Loading,
        }
    }

    /// Rebuilds a page that is already past loading, carrying the price the
    /// user has entered. Used when the form comes back on submission.
    pub fn resume(
        market: Arc<M>,
        metadata: MetadataClient,
        query: ResellQuery,
        price: &str,
    ) -> Self {
        Self {
            market,
            metadata,
            query,
            state: ResellState::Ready {
                form: ResellForm {
                    price: price.to_string(),
                    image: String::new(),
                },
                last_error: None,
            },
        }
    }

    pub fn state(&self) -> &ResellState {
        &self.state
    }

    /// Fetches metadata and moves out of `Loading`. Without a token URI the
    /// page stays in `Loading` and no fetch is issued. Calling this in any
    /// other state is a no-op.
    pub async fn load(&mut self) -> &ResellState {
        if !matches!(self.state, ResellState::Loading) {
            return &self.state;
        }
        let Some(token_uri) = self.query.token_uri.clone() else {
            return &self.state;
        };

        tracing::debug!(token_uri = token_uri, "loading token metadata for resale");
        match self.metadata.fetch(&token_uri).await {
            Ok(metadata) => {
                tracing::debug!(token_uri = token_uri, "resale form ready");
                self.state = ResellState::Ready {
                    form: ResellForm {
                        price: metadata.price,
                        image: metadata.image,
                    },
                    last_error: None,
                };
            }
            Err(error) => {
                tracing::warn!(
                    token_uri = token_uri,
                    error = error.to_string(),
                    "failed to load token metadata for resale"
                );
                self.state = ResellState::Failed { error };
            }
        }

        &self.state
    }

    /// Applies a fresh set of query parameters, as when the router resolves
    /// them after first render. A changed token URI restarts the flow and
    /// refetches; an unchanged one leaves the current state alone.
    pub async fn hydrate(&mut self, query: ResellQuery) -> &ResellState {
        if query.token_uri != self.query.token_uri {
            self.query = query;
            self.state = ResellState::Loading;
        } else {
            self.query = query;
        }
        self.load().await
    }

    /// Updates the asking price. Only meaningful on the editable form;
    /// ignored in every other state.
    pub fn set_price(&mut self, price: &str) {
        if let ResellState::Ready { form, .. } = &mut self.state {
            form.price = price.to_string();
        }
    }

    /// Relists the token at the entered price. Only runs from `Ready`, so a
    /// submission already in flight cannot be doubled. Success navigates
    /// home; failure returns to the form with the error attached and
    /// the entered price intact.
    pub async fn submit(&mut self) -> &ResellState {
        let ResellState::Ready { form, .. } = &self.state else {
            return &self.state;
        };
        let form = form.clone();

        let Some(token_uri) = self.query.token_uri.clone() else {
            self.state = ResellState::Ready {
                form,
                last_error: Some(ShopError::TransactionSetupError(
                    "missing token URI".to_string(),
                )),
            };
            return &self.state;
        };

        tracing::debug!(
            token_id = format!("{:?}", self.query.token_id),
            price = form.price,
            "submitting resale"
        );
        self.state = ResellState::Submitting { form: form.clone() };

        match self
            .market
            .create_sale(&token_uri, &form.price, true, self.query.token_id.as_ref())
            .await
        {
            Ok(()) => {
                tracing::debug!("resale confirmed, navigating home");
                self.state = ResellState::Navigated { to: Route::Home };
            }
            Err(error) => {
                tracing::warn!(
                    token_id = format!("{:?}", self.query.token_id),
                    error = error.to_string(),
                    "resale submission failed"
                );
                self.state = ResellState::Ready {
                    form,
                    last_error: Some(error),
                };
            }
        }

        &self.state
    }

    pub fn render(&self) -> ResellView {
        match &self.state {
            ResellState::Loading => ResellView::Loading,
            ResellState::Ready { form, last_error } => ResellView::Form {
                price: form.price.clone(),
                image: form.image.clone(),
                error: last_error.as_ref().map(|e| e.to_string()),
            },
            ResellState::Submitting { .. } => ResellView::Submitting,
            ResellState::Navigated { to } => ResellView::Navigated {
                to: to.path().to_string(),
            },
            ResellState::Failed { error } => ResellView::Failed {
                error: error.to_string(),
            },
        }
    }
}
