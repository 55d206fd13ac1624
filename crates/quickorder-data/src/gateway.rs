//! Cart submission gateway.

use async_trait::async_trait;
use quickorder_core::cart::{CartLineItem, SubmissionOutcome};
use serde::Serialize;

use crate::{FetchError, GatewayError, GraphQlClient, GraphQlError, GraphQlRequest, HttpTransport};

/// Checkout mutation adding items to the shopper's order form.
pub const ADD_TO_CART_MUTATION: &str = r#"mutation AddToCart($items: [ItemInput]) {
  addToCart(items: $items) {
    items {
      id
      quantity
    }
  }
}"#;

/// Adds line items to the shopper's cart.
///
/// `Ok` carries the gateway's flags; `Err` means the gateway could not be
/// reached at all.
#[async_trait]
pub trait CartGateway: Send + Sync {
    async fn add_to_cart(&self, items: Vec<CartLineItem>) -> Result<SubmissionOutcome, GatewayError>;
}

#[async_trait]
impl<G: CartGateway + ?Sized> CartGateway for std::sync::Arc<G> {
    async fn add_to_cart(&self, items: Vec<CartLineItem>) -> Result<SubmissionOutcome, GatewayError> {
        (**self).add_to_cart(items).await
    }
}

#[derive(Serialize)]
struct AddToCartVariables {
    items: Vec<CartLineItem>,
}

/// [`CartGateway`] backed by the checkout GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphQlCartGateway<T> {
    client: GraphQlClient<T>,
}

impl<T: HttpTransport> GraphQlCartGateway<T> {
    pub fn new(client: GraphQlClient<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: HttpTransport> CartGateway for GraphQlCartGateway<T> {
    async fn add_to_cart(&self, items: Vec<CartLineItem>) -> Result<SubmissionOutcome, GatewayError> {
        let count = items.len();
        let operation = GraphQlRequest::new(ADD_TO_CART_MUTATION, AddToCartVariables { items })
            .with_operation_name("AddToCart");

        match self.client.execute::<_, serde_json::Value>(&operation).await {
            Ok(_) => Ok(SubmissionOutcome::succeeded()),
            // The server answered but refused the items.
            Err(GraphQlError::Errors(messages)) => {
                tracing::warn!(items = count, errors = ?messages, "addToCart returned errors");
                Ok(SubmissionOutcome::failed())
            }
            Err(GraphQlError::Fetch(FetchError::RequestError(reason))) => {
                Err(GatewayError::Unavailable(reason))
            }
            Err(other) => Err(GatewayError::GraphQl(other)),
        }
    }
}
