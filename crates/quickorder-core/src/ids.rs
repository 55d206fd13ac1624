//! Newtype identifiers.
//!
//! A product slug, a SKU id and a seller id are all plain strings on the wire.
//! Wrapping them keeps a slug from ending up in a cart line's `id` field.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Human-readable product identifier used as the lookup key.
    ProductSlug
);
define_id!(
    /// Identifier of a purchasable item (SKU) of a product.
    SkuId
);
define_id!(
    /// Merchant identifier attached to a cart line.
    SellerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = SkuId::new("SKU1");
        assert_eq!(id.as_str(), "SKU1");
        assert_eq!(id.into_inner(), "SKU1");
    }

    #[test]
    fn test_id_from_str() {
        let slug: ProductSlug = "shirt-1".into();
        assert_eq!(slug.to_string(), "shirt-1");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let seller = SellerId::new("1");
        assert_eq!(serde_json::to_string(&seller).unwrap(), "\"1\"");

        let sku: SkuId = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(sku, SkuId::new("A"));
    }
}
