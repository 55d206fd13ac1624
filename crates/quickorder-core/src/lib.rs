//! Domain types and logic for the quick order autocomplete block.
//!
//! This crate has no I/O. It provides:
//!
//! - **Catalog**: search candidates and product lookup responses
//! - **Selection**: the selection state and its reducer
//! - **Quantity**: typed parsing of the free-text quantity field
//! - **Cart**: line items handed to the cart gateway
//! - **View**: the presentation model rendered from selection state
//!
//! # Example
//!
//! ```rust
//! use quickorder_core::prelude::*;
//!
//! let reducer = SelectionReducer::default();
//! let mut state = SelectionState::default();
//!
//! let effect = reducer.reduce(
//!     &mut state,
//!     SelectionAction::ProductChosen {
//!         token: LookupToken::new(1),
//!         candidates: vec![Candidate::new("shirt-1")],
//!     },
//! );
//! assert!(matches!(effect, Some(Effect::Lookup(_))));
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod quantity;
pub mod selection;
pub mod view;

pub use error::AutocompleteError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::AutocompleteError;
    pub use crate::ids::*;

    pub use crate::cart::{CartLineItem, CartRequest, SubmissionOutcome, DEFAULT_SELLER};
    pub use crate::catalog::{Candidate, LookupItem, LookupProduct, LookupResponse};
    pub use crate::quantity::{Quantity, QuantityError, QuantityInput, MAX_QUANTITY_PER_ITEM};
    pub use crate::selection::{
        Effect, LookupStatus, LookupTicket, LookupToken, SelectedProduct, SelectionAction,
        SelectionReducer, SelectionState, SkuVariant, SubmissionStatus,
    };
    pub use crate::view::{AutocompleteView, CssHandle, SelectedView, SkuTag, ViewOptions};
}
