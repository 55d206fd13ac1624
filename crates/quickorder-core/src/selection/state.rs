//! Selection state types.

use crate::catalog::{Candidate, LookupItem};
use crate::error::AutocompleteError;
use crate::ids::{ProductSlug, SkuId};
use crate::quantity::QuantityInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number of a product lookup.
///
/// Tokens are issued in increasing order; only the response carrying the
/// token of the most recently issued lookup is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LookupToken(u64);

impl LookupToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LookupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A purchasable configuration of the selected product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuVariant {
    pub sku_id: SkuId,
    pub display_name: String,
}

impl From<LookupItem> for SkuVariant {
    fn from(item: LookupItem) -> Self {
        Self {
            sku_id: item.item_id,
            display_name: item.name,
        }
    }
}

/// The product currently staged for adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProduct {
    /// Slug the product was looked up by.
    pub slug: ProductSlug,
    /// Display label.
    pub label: String,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// The SKU that will be added; `None` until resolved.
    pub chosen_sku: Option<SkuId>,
    /// All purchasable items of the product, in lookup order.
    pub variants: Vec<SkuVariant>,
}

impl SelectedProduct {
    /// Build from a search candidate and the items its lookup returned.
    ///
    /// A product with a single item has that item chosen up front.
    pub fn from_lookup(candidate: Candidate, items: Vec<LookupItem>) -> Self {
        let chosen_sku = match items.as_slice() {
            [only] => Some(only.item_id.clone()),
            _ => None,
        };
        Self {
            slug: candidate.slug,
            label: candidate.label,
            thumbnail_url: candidate.thumb,
            chosen_sku,
            variants: items.into_iter().map(SkuVariant::from).collect(),
        }
    }

    /// Whether the shopper has to pick among several variants.
    pub fn has_multiple_variants(&self) -> bool {
        self.variants.len() > 1
    }

    /// Whether `sku_id` is one of this product's variants.
    pub fn has_variant(&self, sku_id: &SkuId) -> bool {
        self.variants.iter().any(|v| &v.sku_id == sku_id)
    }

    /// The chosen variant, if any.
    pub fn chosen_variant(&self) -> Option<&SkuVariant> {
        let chosen = self.chosen_sku.as_ref()?;
        self.variants.iter().find(|v| &v.sku_id == chosen)
    }
}

/// Progress of the product lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupStatus {
    /// No lookup in flight.
    #[default]
    Idle,
    /// Waiting for the response to `token`.
    Pending {
        token: LookupToken,
        candidate: Candidate,
    },
}

impl LookupStatus {
    /// The token of the lookup in flight, if any.
    pub fn pending_token(&self) -> Option<LookupToken> {
        match self {
            LookupStatus::Idle => None,
            LookupStatus::Pending { token, .. } => Some(*token),
        }
    }
}

/// Progress of the add-to-cart submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    /// The last submission was not accepted; the selection is kept for retry.
    Failed,
}

/// All mutable state of the autocomplete block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// The staged product, if any.
    pub selected: Option<SelectedProduct>,
    /// The quantity field.
    pub quantity: QuantityInput,
    /// Product lookup progress.
    pub lookup: LookupStatus,
    /// Submission progress.
    pub submission: SubmissionStatus,
    /// The most recent error, cleared by the next successful step.
    pub last_error: Option<AutocompleteError>,
}

impl SelectionState {
    /// Check if no product is staged.
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionStatus::Submitting
    }

    pub fn is_lookup_pending(&self) -> bool {
        matches!(self.lookup, LookupStatus::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item_is_chosen() {
        let product = SelectedProduct::from_lookup(
            Candidate::new("shirt-1").with_label("Shirt"),
            vec![LookupItem::new("SKU1", "One size")],
        );

        assert_eq!(product.chosen_sku, Some(SkuId::new("SKU1")));
        assert_eq!(product.label, "Shirt");
        assert!(!product.has_multiple_variants());
        assert_eq!(product.chosen_variant().unwrap().display_name, "One size");
    }

    #[test]
    fn test_multiple_items_leave_choice_open() {
        let product = SelectedProduct::from_lookup(
            Candidate::new("shirt-2"),
            vec![LookupItem::new("A", "Small"), LookupItem::new("B", "Large")],
        );

        assert_eq!(product.chosen_sku, None);
        assert!(product.has_multiple_variants());
        assert!(product.has_variant(&SkuId::new("B")));
        assert!(!product.has_variant(&SkuId::new("C")));
        assert!(product.chosen_variant().is_none());
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = SelectionState::default();
        assert!(state.is_empty());
        assert!(!state.is_submitting());
        assert!(!state.is_lookup_pending());
        assert_eq!(state.quantity.raw(), "1");
    }
}
