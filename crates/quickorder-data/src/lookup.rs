//! Product lookup.

use async_trait::async_trait;
use quickorder_core::catalog::LookupResponse;
use quickorder_core::ids::ProductSlug;
use serde::Serialize;

use crate::{GraphQlClient, GraphQlRequest, HttpTransport, LookupError};

/// Storefront query fetching the purchasable items of a product.
pub const PRODUCT_QUERY: &str = r#"query Product($slug: String) {
  product(slug: $slug) {
    items {
      itemId
      name
    }
  }
}"#;

/// Resolves a product slug into its purchasable items.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn product(&self, slug: &ProductSlug) -> Result<LookupResponse, LookupError>;
}

#[async_trait]
impl<L: ProductLookup + ?Sized> ProductLookup for std::sync::Arc<L> {
    async fn product(&self, slug: &ProductSlug) -> Result<LookupResponse, LookupError> {
        (**self).product(slug).await
    }
}

#[derive(Serialize)]
struct ProductVariables<'a> {
    slug: &'a str,
}

/// [`ProductLookup`] backed by the storefront GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphQlProductLookup<T> {
    client: GraphQlClient<T>,
}

impl<T: HttpTransport> GraphQlProductLookup<T> {
    pub fn new(client: GraphQlClient<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: HttpTransport> ProductLookup for GraphQlProductLookup<T> {
    async fn product(&self, slug: &ProductSlug) -> Result<LookupResponse, LookupError> {
        let operation = GraphQlRequest::new(PRODUCT_QUERY, ProductVariables { slug: slug.as_str() })
            .with_operation_name("Product");

        let response: LookupResponse = self.client.execute(&operation).await?;
        tracing::debug!(
            slug = %slug,
            items = response.items().len(),
            endpoint = self.client.endpoint(),
            "product lookup returned"
        );
        Ok(response)
    }
}
