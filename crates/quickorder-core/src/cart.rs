//! Cart line items handed to the cart gateway.

use crate::ids::{SellerId, SkuId};
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// Seller attached to every line added by the block.
pub const DEFAULT_SELLER: &str = "1";

/// A single cart line, in the gateway's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// SKU being added.
    pub id: SkuId,
    /// Number of units.
    pub quantity: Quantity,
    /// Merchant selling the SKU.
    pub seller: SellerId,
}

impl CartLineItem {
    /// Create a new line item.
    pub fn new(id: SkuId, quantity: Quantity, seller: SellerId) -> Self {
        Self {
            id,
            quantity,
            seller,
        }
    }
}

/// The items of one add-to-cart submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRequest {
    pub items: Vec<CartLineItem>,
}

impl CartRequest {
    /// A request holding a single line.
    pub fn single(item: CartLineItem) -> Self {
        Self { items: vec![item] }
    }
}

/// Flags reported by the cart gateway once a submission completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// The gateway is still working on the request.
    pub loading: bool,
    /// The items were added.
    pub success: bool,
}

impl SubmissionOutcome {
    /// A completed, successful submission.
    pub fn succeeded() -> Self {
        Self {
            loading: false,
            success: true,
        }
    }

    /// A completed, failed submission.
    pub fn failed() -> Self {
        Self {
            loading: false,
            success: false,
        }
    }

    /// Whether the selection should be cleared.
    pub fn is_complete_success(&self) -> bool {
        !self.loading && self.success
    }
}
