//! Collaborator clients for the quick order autocomplete block.
//!
//! This crate provides:
//! - `HttpTransport` - the host-provided HTTP seam
//! - `FetchClient` - base URL and default header handling over a transport
//! - `GraphQlClient` - GraphQL request/response envelope handling
//! - `ProductLookup` / `GraphQlProductLookup` - product lookup by slug
//! - `CartGateway` / `GraphQlCartGateway` - add-to-cart submission

mod client;
mod error;
mod gateway;
mod graphql;
mod lookup;
mod request;
mod response;
mod transport;

pub use client::FetchClient;
pub use error::{FetchError, GatewayError, GraphQlError, LookupError};
pub use gateway::{CartGateway, GraphQlCartGateway, ADD_TO_CART_MUTATION};
pub use graphql::{GraphQlClient, GraphQlErrorEntry, GraphQlRequest, GraphQlResponse};
pub use lookup::{GraphQlProductLookup, ProductLookup, PRODUCT_QUERY};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::HttpTransport;
