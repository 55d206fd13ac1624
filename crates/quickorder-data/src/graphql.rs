//! GraphQL over HTTP.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{FetchClient, GraphQlError, HttpTransport};

/// A GraphQL operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
    pub variables: V,
}

impl<'a, V: Serialize> GraphQlRequest<'a, V> {
    pub fn new(query: &'a str, variables: V) -> Self {
        Self {
            query,
            operation_name: None,
            variables,
        }
    }

    pub fn with_operation_name(mut self, name: &'a str) -> Self {
        self.operation_name = Some(name);
        self
    }
}

/// A GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<R> {
    pub data: Option<R>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

impl<R> GraphQlResponse<R> {
    /// Data if the server reported no errors.
    pub fn into_result(self) -> Result<R, GraphQlError> {
        if !self.errors.is_empty() {
            return Err(GraphQlError::Errors(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(GraphQlError::MissingData)
    }
}

/// Client for a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient<T> {
    fetch: FetchClient<T>,
    endpoint: String,
}

impl<T: HttpTransport> GraphQlClient<T> {
    /// Create a client posting to `endpoint` through `fetch`.
    pub fn new(fetch: FetchClient<T>, endpoint: impl Into<String>) -> Self {
        Self {
            fetch,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute an operation and decode its `data`.
    pub async fn execute<V, R>(&self, operation: &GraphQlRequest<'_, V>) -> Result<R, GraphQlError>
    where
        V: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .fetch
            .post(self.endpoint.clone())
            .accept("application/json")
            .json(operation)?;

        let response = self.fetch.send(request).await?;
        let envelope: GraphQlResponse<R> = response.json()?;
        envelope.into_result()
    }
}
