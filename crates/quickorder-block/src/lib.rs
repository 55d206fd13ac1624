//! Quick order autocomplete block.
//!
//! Wires the pure selection reducer from `quickorder-core` to the product
//! lookup and cart gateway from `quickorder-data`.
//!
//! This crate provides:
//! - `BlockConfig` - block settings loaded from TOML or JSON
//! - `AutocompleteController` - the event handlers of a mounted block
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use quickorder_block::{AutocompleteController, BlockConfig};
//! use quickorder_data::{GraphQlCartGateway, GraphQlProductLookup};
//!
//! let config = BlockConfig::load("quickorder.toml")?;
//! let graphql = config.graphql_client(Arc::new(transport));
//! let controller = AutocompleteController::new(
//!     &config,
//!     GraphQlProductLookup::new(graphql.clone()),
//!     GraphQlCartGateway::new(graphql),
//! );
//!
//! controller.on_product_chosen(candidates).await?;
//! controller.on_quantity_edited("2");
//! controller.on_submit().await?;
//! ```

pub mod config;
pub mod controller;

pub use config::{BlockConfig, GraphQlConfig};
pub use controller::{AutocompleteController, LookupOutcome};
