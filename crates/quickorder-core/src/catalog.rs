//! Search candidates and product lookup data.
//!
//! Field names follow the storefront GraphQL schema (`itemId`, camelCase).

use crate::ids::{ProductSlug, SkuId};
use serde::{Deserialize, Serialize};

/// A record emitted by the search widget when the shopper picks a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Lookup key for the product.
    pub slug: ProductSlug,
    /// Display label shown next to the thumbnail.
    #[serde(default)]
    pub label: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumb: String,
}

impl Candidate {
    /// Create a candidate with only a slug.
    pub fn new(slug: impl Into<ProductSlug>) -> Self {
        Self {
            slug: slug.into(),
            label: String::new(),
            thumb: String::new(),
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the thumbnail URL.
    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = thumb.into();
        self
    }
}

/// Response of the product lookup query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    /// `None` when no product matches the slug.
    #[serde(default)]
    pub product: Option<LookupProduct>,
}

impl LookupResponse {
    /// Build a response for a product with the given items.
    pub fn with_items(items: Vec<LookupItem>) -> Self {
        Self {
            product: Some(LookupProduct { items }),
        }
    }

    /// Purchasable items, empty when the product was not found.
    pub fn items(&self) -> &[LookupItem] {
        self.product
            .as_ref()
            .map(|p| p.items.as_slice())
            .unwrap_or_default()
    }
}

/// The product part of a lookup response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupProduct {
    /// Purchasable items (SKUs), in catalog order.
    #[serde(default)]
    pub items: Vec<LookupItem>,
}

/// A purchasable item of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupItem {
    /// SKU identifier.
    pub item_id: SkuId,
    /// Variant display name (e.g., "Large / Blue").
    #[serde(default)]
    pub name: String,
}

impl LookupItem {
    /// Create a new item.
    pub fn new(item_id: impl Into<SkuId>, name: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
        }
    }
}
