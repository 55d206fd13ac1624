//! Autocomplete block error types.

use crate::ids::ProductSlug;
use crate::quantity::QuantityError;
use thiserror::Error;

/// Errors surfaced by the autocomplete block.
///
/// These are kept in the selection state as well as returned from the
/// controller, so they are `Clone` and carry display text rather than
/// source errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteError {
    /// The product lookup request failed.
    #[error("Product lookup failed: {0}")]
    LookupFailed(String),

    /// No product matches the slug.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductSlug),

    /// The product exists but has no purchasable items.
    #[error("Product has no purchasable items: {0}")]
    NoPurchasableItems(ProductSlug),

    /// Submit was requested with no product selected.
    #[error("No product selected")]
    NothingSelected,

    /// Submit was requested before a variant was chosen.
    #[error("Choose a variant before adding to cart")]
    VariantNotChosen,

    /// The quantity field does not hold a valid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// A submission is already in flight.
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// The cart gateway did not accept the items.
    #[error("Add to cart failed: {0}")]
    SubmissionRejected(String),
}
