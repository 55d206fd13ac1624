//! Selection reducer.
//!
//! Every user action and every collaborator response is a [`SelectionAction`].
//! [`SelectionReducer::reduce`] applies it to the state and returns the effect
//! the caller has to run, if any. The reducer never performs I/O.

use crate::cart::{CartLineItem, CartRequest, SubmissionOutcome, DEFAULT_SELLER};
use crate::catalog::{Candidate, LookupResponse};
use crate::error::AutocompleteError;
use crate::ids::{ProductSlug, SellerId, SkuId};
use crate::quantity::{QuantityInput, MAX_QUANTITY_PER_ITEM};
use crate::selection::{LookupStatus, LookupToken, SelectedProduct, SelectionState, SubmissionStatus};

/// Events that drive the selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// The search widget yielded candidates; only the first one is used.
    ProductChosen {
        token: LookupToken,
        candidates: Vec<Candidate>,
    },
    /// The lookup issued under `token` returned.
    LookupResolved {
        token: LookupToken,
        response: LookupResponse,
    },
    /// The lookup issued under `token` failed.
    LookupFailed { token: LookupToken, reason: String },
    /// The shopper picked a SKU tag.
    VariantChosen { sku_id: SkuId },
    /// The quantity field changed.
    QuantityEdited { raw: String },
    /// The shopper pressed the add button.
    SubmitRequested,
    /// The cart gateway finished and reported its flags.
    SubmissionCompleted { outcome: SubmissionOutcome },
    /// The cart gateway could not be reached.
    SubmissionFailed { reason: String },
}

/// A lookup the caller has to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub token: LookupToken,
    pub slug: ProductSlug,
}

/// Work requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the product lookup and report back with the same token.
    Lookup(LookupTicket),
    /// Send the request to the cart gateway.
    Submit(CartRequest),
    /// A product choice or lookup response carried a superseded token and
    /// was dropped.
    Discarded {
        token: LookupToken,
        latest: Option<LookupToken>,
    },
    /// The action was refused; the error is also stored in `last_error`.
    Rejected(AutocompleteError),
}

/// Applies [`SelectionAction`]s to a [`SelectionState`].
#[derive(Debug, Clone)]
pub struct SelectionReducer {
    seller: SellerId,
    max_quantity: u32,
}

impl Default for SelectionReducer {
    fn default() -> Self {
        Self {
            seller: SellerId::new(DEFAULT_SELLER),
            max_quantity: MAX_QUANTITY_PER_ITEM,
        }
    }
}

impl SelectionReducer {
    /// Create a reducer with the given seller and quantity limit.
    pub fn new(seller: SellerId, max_quantity: u32) -> Self {
        Self {
            seller,
            max_quantity,
        }
    }

    /// Seller attached to submitted lines.
    pub fn seller(&self) -> &SellerId {
        &self.seller
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Apply an action and return the effect to run, if any.
    pub fn reduce(&self, state: &mut SelectionState, action: SelectionAction) -> Option<Effect> {
        match action {
            SelectionAction::ProductChosen { token, candidates } => {
                product_chosen(state, token, candidates)
            }
            SelectionAction::LookupResolved { token, response } => {
                lookup_resolved(state, token, response)
            }
            SelectionAction::LookupFailed { token, reason } => lookup_failed(state, token, reason),
            SelectionAction::VariantChosen { sku_id } => {
                variant_chosen(state, sku_id);
                None
            }
            SelectionAction::QuantityEdited { raw } => {
                state.quantity = QuantityInput::edit(raw, self.max_quantity);
                None
            }
            SelectionAction::SubmitRequested => self.submit_requested(state),
            SelectionAction::SubmissionCompleted { outcome } => {
                submission_completed(state, outcome)
            }
            SelectionAction::SubmissionFailed { reason } => {
                reject_submission(state, AutocompleteError::SubmissionRejected(reason))
            }
        }
    }

    fn submit_requested(&self, state: &mut SelectionState) -> Option<Effect> {
        match self.build_request(state) {
            Ok(request) => {
                state.submission = SubmissionStatus::Submitting;
                state.last_error = None;
                Some(Effect::Submit(request))
            }
            Err(err) => {
                state.last_error = Some(err.clone());
                Some(Effect::Rejected(err))
            }
        }
    }

    fn build_request(&self, state: &SelectionState) -> Result<CartRequest, AutocompleteError> {
        if state.is_submitting() {
            return Err(AutocompleteError::SubmissionInProgress);
        }
        let selected = state
            .selected
            .as_ref()
            .ok_or(AutocompleteError::NothingSelected)?;
        let sku = selected
            .chosen_sku
            .clone()
            .ok_or(AutocompleteError::VariantNotChosen)?;
        let quantity = state.quantity.parsed()?;

        Ok(CartRequest::single(CartLineItem::new(
            sku,
            quantity,
            self.seller.clone(),
        )))
    }
}

fn product_chosen(
    state: &mut SelectionState,
    token: LookupToken,
    candidates: Vec<Candidate>,
) -> Option<Effect> {
    let candidate = candidates.into_iter().next()?;

    // A lookup issued earlier than the one in flight never replaces it.
    if let Some(pending) = state.lookup.pending_token() {
        if token < pending {
            return Some(Effect::Discarded {
                token,
                latest: Some(pending),
            });
        }
    }

    let slug = candidate.slug.clone();

    state.lookup = LookupStatus::Pending { token, candidate };
    state.last_error = None;

    Some(Effect::Lookup(LookupTicket { token, slug }))
}

/// Take the pending candidate if `token` is the lookup in flight.
fn take_pending(state: &mut SelectionState, token: LookupToken) -> Result<Candidate, Effect> {
    match std::mem::take(&mut state.lookup) {
        LookupStatus::Pending {
            token: pending,
            candidate,
        } if pending == token => Ok(candidate),
        other => {
            let latest = other.pending_token();
            state.lookup = other;
            Err(Effect::Discarded { token, latest })
        }
    }
}

fn lookup_resolved(
    state: &mut SelectionState,
    token: LookupToken,
    response: LookupResponse,
) -> Option<Effect> {
    let candidate = match take_pending(state, token) {
        Ok(candidate) => candidate,
        Err(discarded) => return Some(discarded),
    };

    let Some(product) = response.product else {
        let err = AutocompleteError::ProductNotFound(candidate.slug);
        state.last_error = Some(err.clone());
        return Some(Effect::Rejected(err));
    };

    if product.items.is_empty() {
        let err = AutocompleteError::NoPurchasableItems(candidate.slug);
        state.last_error = Some(err.clone());
        return Some(Effect::Rejected(err));
    }

    state.selected = Some(SelectedProduct::from_lookup(candidate, product.items));
    state.last_error = None;
    None
}

fn lookup_failed(state: &mut SelectionState, token: LookupToken, reason: String) -> Option<Effect> {
    if let Err(discarded) = take_pending(state, token) {
        return Some(discarded);
    }
    let err = AutocompleteError::LookupFailed(reason);
    state.last_error = Some(err.clone());
    Some(Effect::Rejected(err))
}

fn variant_chosen(state: &mut SelectionState, sku_id: SkuId) {
    if let Some(selected) = state.selected.as_mut() {
        selected.chosen_sku = Some(sku_id);
        if state.last_error == Some(AutocompleteError::VariantNotChosen) {
            state.last_error = None;
        }
    }
}

fn submission_completed(state: &mut SelectionState, outcome: SubmissionOutcome) -> Option<Effect> {
    if outcome.is_complete_success() {
        *state = SelectionState::default();
        return None;
    }
    let reason = if outcome.loading {
        "cart is still updating"
    } else {
        "cart rejected the items"
    };
    reject_submission(state, AutocompleteError::SubmissionRejected(reason.to_string()))
}

fn reject_submission(state: &mut SelectionState, err: AutocompleteError) -> Option<Effect> {
    state.submission = SubmissionStatus::Failed;
    state.last_error = Some(err.clone());
    Some(Effect::Rejected(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LookupItem;
    use crate::quantity::{Quantity, QuantityError};

    fn token(n: u64) -> LookupToken {
        LookupToken::new(n)
    }

    fn choose(reducer: &SelectionReducer, state: &mut SelectionState, n: u64, slug: &str) {
        reducer.reduce(
            state,
            SelectionAction::ProductChosen {
                token: token(n),
                candidates: vec![Candidate::new(slug).with_label(slug).with_thumb("thumb.png")],
            },
        );
    }

    fn resolve(
        reducer: &SelectionReducer,
        state: &mut SelectionState,
        n: u64,
        items: Vec<LookupItem>,
    ) -> Option<Effect> {
        reducer.reduce(
            state,
            SelectionAction::LookupResolved {
                token: token(n),
                response: LookupResponse::with_items(items),
            },
        )
    }

    fn selected_with(items: Vec<LookupItem>) -> (SelectionReducer, SelectionState) {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();
        choose(&reducer, &mut state, 1, "shirt-1");
        resolve(&reducer, &mut state, 1, items);
        (reducer, state)
    }

    #[test]
    fn test_empty_candidates_is_noop() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::ProductChosen {
                token: token(1),
                candidates: vec![],
            },
        );

        assert_eq!(effect, None);
        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn test_only_first_candidate_is_looked_up() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::ProductChosen {
                token: token(7),
                candidates: vec![Candidate::new("first"), Candidate::new("second")],
            },
        );

        assert_eq!(
            effect,
            Some(Effect::Lookup(LookupTicket {
                token: token(7),
                slug: ProductSlug::new("first"),
            }))
        );
        assert_eq!(state.lookup.pending_token(), Some(token(7)));
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_single_item_auto_selects_sku() {
        let (_, state) = selected_with(vec![LookupItem::new("SKU1", "Default")]);

        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.chosen_sku, Some(SkuId::new("SKU1")));
        assert_eq!(selected.label, "shirt-1");
        assert_eq!(selected.thumbnail_url, "thumb.png");
        assert!(!state.is_lookup_pending());
    }

    #[test]
    fn test_multiple_items_wait_for_variant() {
        let (reducer, mut state) = selected_with(vec![
            LookupItem::new("A", "Small"),
            LookupItem::new("B", "Large"),
        ]);
        assert_eq!(state.selected.as_ref().unwrap().chosen_sku, None);

        let before = state.selected.clone().unwrap();
        reducer.reduce(
            &mut state,
            SelectionAction::VariantChosen {
                sku_id: SkuId::new("B"),
            },
        );

        let after = state.selected.as_ref().unwrap();
        assert_eq!(after.chosen_sku, Some(SkuId::new("B")));
        assert_eq!(after.label, before.label);
        assert_eq!(after.thumbnail_url, before.thumbnail_url);
        assert_eq!(after.variants, before.variants);
    }

    #[test]
    fn test_variant_without_selection_is_noop() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        reducer.reduce(
            &mut state,
            SelectionAction::VariantChosen {
                sku_id: SkuId::new("A"),
            },
        );

        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn test_new_lookup_replaces_selection() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "Default")]);

        choose(&reducer, &mut state, 2, "pants-1");
        resolve(
            &reducer,
            &mut state,
            2,
            vec![LookupItem::new("P1", "30"), LookupItem::new("P2", "32")],
        );

        let selected = state.selected.as_ref().unwrap();
        assert_eq!(selected.slug, ProductSlug::new("pants-1"));
        assert_eq!(selected.chosen_sku, None);
        assert_eq!(selected.variants.len(), 2);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        choose(&reducer, &mut state, 1, "old");
        choose(&reducer, &mut state, 2, "new");

        let effect = resolve(&reducer, &mut state, 2, vec![LookupItem::new("NEW", "")]);
        assert_eq!(effect, None);

        let effect = resolve(&reducer, &mut state, 1, vec![LookupItem::new("OLD", "")]);
        assert_eq!(
            effect,
            Some(Effect::Discarded {
                token: token(1),
                latest: None,
            })
        );
        assert_eq!(
            state.selected.as_ref().unwrap().chosen_sku,
            Some(SkuId::new("NEW"))
        );
    }

    #[test]
    fn test_stale_response_keeps_newer_lookup_pending() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        choose(&reducer, &mut state, 1, "old");
        choose(&reducer, &mut state, 2, "new");

        let effect = resolve(&reducer, &mut state, 1, vec![LookupItem::new("OLD", "")]);
        assert_eq!(
            effect,
            Some(Effect::Discarded {
                token: token(1),
                latest: Some(token(2)),
            })
        );
        assert!(state.selected.is_none());
        assert_eq!(state.lookup.pending_token(), Some(token(2)));
    }

    #[test]
    fn test_out_of_order_dispatch_keeps_latest_lookup() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        choose(&reducer, &mut state, 2, "new");
        let effect = reducer.reduce(
            &mut state,
            SelectionAction::ProductChosen {
                token: token(1),
                candidates: vec![Candidate::new("old")],
            },
        );

        assert_eq!(
            effect,
            Some(Effect::Discarded {
                token: token(1),
                latest: Some(token(2)),
            })
        );
        assert_eq!(state.lookup.pending_token(), Some(token(2)));

        assert_eq!(resolve(&reducer, &mut state, 2, vec![LookupItem::new("NEW", "")]), None);
        assert!(matches!(
            resolve(&reducer, &mut state, 1, vec![LookupItem::new("OLD", "")]),
            Some(Effect::Discarded { .. })
        ));
        assert_eq!(
            state.selected.as_ref().unwrap().slug,
            ProductSlug::new("new")
        );
    }

    #[test]
    fn test_stale_lookup_failure_is_ignored() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();

        choose(&reducer, &mut state, 1, "old");
        choose(&reducer, &mut state, 2, "new");

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::LookupFailed {
                token: token(1),
                reason: "timeout".to_string(),
            },
        );

        assert_eq!(
            effect,
            Some(Effect::Discarded {
                token: token(1),
                latest: Some(token(2)),
            })
        );
        assert_eq!(state.lookup.pending_token(), Some(token(2)));
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_product_not_found() {
        let reducer = SelectionReducer::default();
        let mut state = SelectionState::default();
        choose(&reducer, &mut state, 1, "ghost");

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::LookupResolved {
                token: token(1),
                response: LookupResponse::default(),
            },
        );

        let err = AutocompleteError::ProductNotFound(ProductSlug::new("ghost"));
        assert_eq!(effect, Some(Effect::Rejected(err.clone())));
        assert_eq!(state.last_error, Some(err));
        assert!(state.selected.is_none());
        assert!(!state.is_lookup_pending());
    }

    #[test]
    fn test_product_without_items_is_rejected() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        choose(&reducer, &mut state, 2, "empty");

        let effect = resolve(&reducer, &mut state, 2, vec![]);

        assert!(matches!(
            effect,
            Some(Effect::Rejected(AutocompleteError::NoPurchasableItems(_)))
        ));
        // Previous selection survives.
        assert_eq!(
            state.selected.as_ref().unwrap().chosen_sku,
            Some(SkuId::new("SKU1"))
        );
    }

    #[test]
    fn test_lookup_failure_leaves_selection() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        let before = state.selected.clone();
        choose(&reducer, &mut state, 2, "broken");

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::LookupFailed {
                token: token(2),
                reason: "connection reset".to_string(),
            },
        );

        assert_eq!(
            effect,
            Some(Effect::Rejected(AutocompleteError::LookupFailed(
                "connection reset".to_string()
            )))
        );
        assert_eq!(state.selected, before);
        assert!(!state.is_lookup_pending());
    }

    #[test]
    fn test_quantity_edit_keeps_raw_text() {
        let reducer = SelectionReducer::new(SellerId::new("1"), 5);
        let mut state = SelectionState::default();

        reducer.reduce(
            &mut state,
            SelectionAction::QuantityEdited {
                raw: "6".to_string(),
            },
        );

        assert_eq!(state.quantity.raw(), "6");
        assert_eq!(
            state.quantity.parsed(),
            Err(QuantityError::TooLarge { value: 6, max: 5 })
        );
    }

    #[test]
    fn test_submit_builds_single_line() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        reducer.reduce(
            &mut state,
            SelectionAction::QuantityEdited {
                raw: "2".to_string(),
            },
        );

        let effect = reducer.reduce(&mut state, SelectionAction::SubmitRequested);

        let expected = CartRequest::single(CartLineItem::new(
            SkuId::new("SKU1"),
            Quantity::new(2, 10).unwrap(),
            SellerId::new("1"),
        ));
        assert_eq!(effect, Some(Effect::Submit(expected)));
        assert!(state.is_submitting());
    }

    #[test]
    fn test_submit_rejections() {
        let reducer = SelectionReducer::default();

        let mut state = SelectionState::default();
        assert_eq!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Rejected(AutocompleteError::NothingSelected))
        );

        let (reducer, mut state) = selected_with(vec![
            LookupItem::new("A", ""),
            LookupItem::new("B", ""),
        ]);
        assert_eq!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Rejected(AutocompleteError::VariantNotChosen))
        );
        assert_eq!(state.last_error, Some(AutocompleteError::VariantNotChosen));
        assert!(!state.is_submitting());

        reducer.reduce(
            &mut state,
            SelectionAction::VariantChosen {
                sku_id: SkuId::new("A"),
            },
        );
        assert_eq!(state.last_error, None);

        reducer.reduce(
            &mut state,
            SelectionAction::QuantityEdited {
                raw: "two".to_string(),
            },
        );
        assert_eq!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Rejected(AutocompleteError::InvalidQuantity(
                QuantityError::NotANumber("two".to_string())
            )))
        );
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);

        assert!(matches!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Submit(_))
        ));
        assert_eq!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Rejected(AutocompleteError::SubmissionInProgress))
        );
    }

    #[test]
    fn test_success_resets_to_initial_state() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        reducer.reduce(
            &mut state,
            SelectionAction::QuantityEdited {
                raw: "4".to_string(),
            },
        );
        reducer.reduce(&mut state, SelectionAction::SubmitRequested);
        // A lookup started while the submission was in flight is dropped too.
        choose(&reducer, &mut state, 2, "late");

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::SubmissionCompleted {
                outcome: SubmissionOutcome::succeeded(),
            },
        );

        assert_eq!(effect, None);
        assert_eq!(state, SelectionState::default());

        let effect = resolve(&reducer, &mut state, 2, vec![LookupItem::new("LATE", "")]);
        assert!(matches!(effect, Some(Effect::Discarded { .. })));
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_failure_keeps_selection_for_retry() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        reducer.reduce(&mut state, SelectionAction::SubmitRequested);
        let selected = state.selected.clone();
        let quantity = state.quantity.clone();

        let effect = reducer.reduce(
            &mut state,
            SelectionAction::SubmissionCompleted {
                outcome: SubmissionOutcome::failed(),
            },
        );

        assert!(matches!(
            effect,
            Some(Effect::Rejected(AutocompleteError::SubmissionRejected(_)))
        ));
        assert_eq!(state.selected, selected);
        assert_eq!(state.quantity, quantity);
        assert_eq!(state.submission, SubmissionStatus::Failed);

        // Retry is allowed after a failure.
        assert!(matches!(
            reducer.reduce(&mut state, SelectionAction::SubmitRequested),
            Some(Effect::Submit(_))
        ));
    }

    #[test]
    fn test_still_loading_is_not_success() {
        let (reducer, mut state) = selected_with(vec![LookupItem::new("SKU1", "")]);
        reducer.reduce(&mut state, SelectionAction::SubmitRequested);

        reducer.reduce(
            &mut state,
            SelectionAction::SubmissionCompleted {
                outcome: SubmissionOutcome {
                    loading: true,
                    success: true,
                },
            },
        );

        assert!(state.selected.is_some());
        assert_eq!(state.submission, SubmissionStatus::Failed);
    }
}
