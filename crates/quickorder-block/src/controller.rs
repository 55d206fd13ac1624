//! Selection controller.
//!
//! Bridges user events, the product lookup and the cart gateway. All state
//! changes go through the [`SelectionReducer`]; the controller only runs the
//! effects it returns.
//!
//! ```text
//!   on_product_chosen ──► ProductChosen ──► Effect::Lookup ──► lookup.product()
//!                                                                   │
//!                         LookupResolved / LookupFailed ◄───────────┘
//!
//!   on_submit ──► SubmitRequested ──► Effect::Submit ──► gateway.add_to_cart()
//!                                                                   │
//!                 SubmissionCompleted / SubmissionFailed ◄──────────┘
//! ```
//!
//! The state lock is only held while the reducer runs, never across an
//! `.await`, so a second search can start while a lookup is in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use quickorder_core::catalog::Candidate;
use quickorder_core::error::AutocompleteError;
use quickorder_core::ids::SkuId;
use quickorder_core::quantity::{Quantity, QuantityError};
use quickorder_core::selection::{
    Effect, LookupToken, SelectionAction, SelectionReducer, SelectionState,
};
use quickorder_core::view::{AutocompleteView, ViewOptions};
use quickorder_data::{CartGateway, ProductLookup};

use crate::config::BlockConfig;

/// What became of a product choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// No candidates; nothing was looked up.
    Skipped,
    /// The response was applied to the selection.
    Applied,
    /// A newer lookup was issued meanwhile; this choice or its response was
    /// dropped.
    Stale,
}

/// Controller of one mounted autocomplete block.
pub struct AutocompleteController<L, G> {
    reducer: SelectionReducer,
    view_options: ViewOptions,
    lookup: L,
    gateway: G,
    state: Mutex<SelectionState>,
    last_token: AtomicU64,
}

impl<L: ProductLookup, G: CartGateway> AutocompleteController<L, G> {
    /// Create a controller with an empty selection.
    pub fn new(config: &BlockConfig, lookup: L, gateway: G) -> Self {
        Self {
            reducer: config.reducer(),
            view_options: config.view.clone(),
            lookup,
            gateway,
            state: Mutex::new(SelectionState::default()),
            last_token: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SelectionState {
        self.lock().clone()
    }

    /// Presentation model of the current state.
    pub fn view(&self) -> AutocompleteView {
        AutocompleteView::render(&self.lock(), &self.view_options)
    }

    /// The search widget yielded `candidates`.
    ///
    /// Looks up the first candidate and stages it once the response arrives,
    /// unless another product was chosen in the meantime.
    pub async fn on_product_chosen(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<LookupOutcome, AutocompleteError> {
        let (token, effect) = {
            let mut state = self.lock();
            // Issued under the state lock so dispatch order follows issue order.
            let token = LookupToken::new(self.last_token.fetch_add(1, Ordering::SeqCst) + 1);
            let effect = self
                .reducer
                .reduce(&mut state, SelectionAction::ProductChosen { token, candidates });
            (token, effect)
        };

        let ticket = match effect {
            Some(Effect::Lookup(ticket)) => ticket,
            Some(Effect::Discarded { latest, .. }) => {
                tracing::debug!(
                    token = token.get(),
                    latest = latest.map(|t| t.get()),
                    "product choice superseded before lookup"
                );
                return Ok(LookupOutcome::Stale);
            }
            _ => return Ok(LookupOutcome::Skipped),
        };
        tracing::info!(slug = %ticket.slug, token = token.get(), "issuing product lookup");

        let action = match self.lookup.product(&ticket.slug).await {
            Ok(response) => SelectionAction::LookupResolved { token, response },
            Err(err) => {
                tracing::warn!(slug = %ticket.slug, token = token.get(), error = %err, "product lookup failed");
                SelectionAction::LookupFailed {
                    token,
                    reason: err.to_string(),
                }
            }
        };

        match self.dispatch(action) {
            Some(Effect::Discarded { token, latest }) => {
                tracing::debug!(
                    token = token.get(),
                    latest = latest.map(|t| t.get()),
                    "discarding stale lookup response"
                );
                Ok(LookupOutcome::Stale)
            }
            Some(Effect::Rejected(err)) => Err(err),
            _ => Ok(LookupOutcome::Applied),
        }
    }

    /// The shopper picked a SKU tag.
    pub fn on_variant_chosen(&self, sku_id: impl Into<SkuId>) {
        let sku_id = sku_id.into();
        let mut state = self.lock();
        if let Some(selected) = &state.selected {
            if !selected.has_variant(&sku_id) {
                tracing::warn!(sku = %sku_id, slug = %selected.slug, "chosen sku is not a variant of the selected product");
            }
        }
        self.reducer
            .reduce(&mut state, SelectionAction::VariantChosen { sku_id });
    }

    /// The quantity field changed; returns its parse result.
    pub fn on_quantity_edited(&self, raw: impl Into<String>) -> Result<Quantity, QuantityError> {
        let mut state = self.lock();
        self.reducer
            .reduce(&mut state, SelectionAction::QuantityEdited { raw: raw.into() });
        state.quantity.parsed()
    }

    /// The shopper pressed the add button.
    ///
    /// On success the selection is cleared. On failure it is kept so the
    /// shopper can retry.
    pub async fn on_submit(&self) -> Result<(), AutocompleteError> {
        let request = match self.dispatch(SelectionAction::SubmitRequested) {
            Some(Effect::Submit(request)) => request,
            Some(Effect::Rejected(err)) => {
                tracing::info!(error = %err, "submission refused");
                return Err(err);
            }
            // Submit requests only produce the two effects above.
            _ => return Ok(()),
        };

        let lines = request.items.len();
        tracing::info!(lines, "submitting to cart");

        let action = match self.gateway.add_to_cart(request.items).await {
            Ok(outcome) => SelectionAction::SubmissionCompleted { outcome },
            Err(err) => {
                tracing::warn!(error = %err, "cart gateway unavailable");
                SelectionAction::SubmissionFailed {
                    reason: err.to_string(),
                }
            }
        };

        match self.dispatch(action) {
            Some(Effect::Rejected(err)) => {
                tracing::warn!(error = %err, "submission rejected");
                Err(err)
            }
            _ => {
                tracing::info!(lines, "added to cart");
                Ok(())
            }
        }
    }

    fn dispatch(&self, action: SelectionAction) -> Option<Effect> {
        let mut state = self.lock();
        self.reducer.reduce(&mut state, action)
    }

    fn lock(&self) -> MutexGuard<'_, SelectionState> {
        // State is replaced wholesale by the reducer, so a poisoned lock still
        // holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
