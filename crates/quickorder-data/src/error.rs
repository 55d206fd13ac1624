//! Data layer error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

/// Errors from a GraphQL operation.
#[derive(Error, Debug)]
pub enum GraphQlError {
    /// The HTTP exchange failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The server answered with GraphQL errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    Errors(Vec<String>),

    /// The response carried neither data nor errors.
    #[error("GraphQL response has no data")]
    MissingData,
}

/// Errors from the product lookup.
pub type LookupError = GraphQlError;

/// Errors from the cart gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The gateway could not be reached.
    #[error("Cart gateway unavailable: {0}")]
    Unavailable(String),

    /// The underlying GraphQL exchange failed.
    #[error(transparent)]
    GraphQl(#[from] GraphQlError),
}
