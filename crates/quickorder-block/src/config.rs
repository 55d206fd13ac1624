//! Block configuration.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use quickorder_core::cart::DEFAULT_SELLER;
use quickorder_core::ids::SellerId;
use quickorder_core::quantity::MAX_QUANTITY_PER_ITEM;
use quickorder_core::selection::SelectionReducer;
use quickorder_core::view::ViewOptions;
use quickorder_data::{FetchClient, GraphQlClient, HttpTransport};
use serde::{Deserialize, Serialize};

/// Configuration of one mounted autocomplete block.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Seller attached to submitted cart lines.
    #[serde(default = "default_seller")]
    pub seller_id: String,

    /// Largest quantity accepted in the quantity field.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    /// Rendering options.
    #[serde(default)]
    pub view: ViewOptions,

    /// GraphQL endpoint used for lookups and cart submission.
    #[serde(default)]
    pub graphql: GraphQlConfig,
}

fn default_seller() -> String {
    DEFAULT_SELLER.to_string()
}

fn default_max_quantity() -> u32 {
    MAX_QUANTITY_PER_ITEM
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            seller_id: default_seller(),
            max_quantity: default_max_quantity(),
            view: ViewOptions::default(),
            graphql: GraphQlConfig::default(),
        }
    }
}

impl BlockConfig {
    /// Load config from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the block cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.seller_id.trim().is_empty() {
            bail!("seller_id must not be empty");
        }
        if self.max_quantity == 0 {
            bail!("max_quantity must be at least 1");
        }
        if self.graphql.endpoint.trim().is_empty() {
            bail!("graphql.endpoint must not be empty");
        }
        Ok(())
    }

    /// Set the seller.
    pub fn with_seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = seller_id.into();
        self
    }

    /// Set the quantity limit.
    pub fn with_max_quantity(mut self, max_quantity: u32) -> Self {
        self.max_quantity = max_quantity;
        self
    }

    /// Set the GraphQL base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.graphql.base_url = Some(base_url.into());
        self
    }

    /// Build the selection reducer for these settings.
    pub fn reducer(&self) -> SelectionReducer {
        SelectionReducer::new(SellerId::new(self.seller_id.clone()), self.max_quantity)
    }

    /// Build a GraphQL client for the configured endpoint.
    pub fn graphql_client<T: HttpTransport>(&self, transport: T) -> GraphQlClient<T> {
        let mut fetch = FetchClient::new(transport);
        if let Some(base_url) = &self.graphql.base_url {
            fetch = fetch.with_base_url(base_url.clone());
        }
        for (key, value) in &self.graphql.headers {
            fetch = fetch.with_default_header(key.clone(), value.clone());
        }
        GraphQlClient::new(fetch, self.graphql.endpoint.clone())
    }
}

/// GraphQL endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlConfig {
    /// Endpoint path or absolute URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL prepended to a relative endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_endpoint() -> String {
    "/_v/graphql".to_string()
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            base_url: None,
            headers: HashMap::new(),
        }
    }
}
