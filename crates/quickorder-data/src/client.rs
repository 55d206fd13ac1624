//! Fetch client bound to a transport.

use std::collections::HashMap;

use crate::{FetchError, HttpTransport, Method, RequestBuilder, Response};

/// HTTP client for outbound requests.
///
/// Resolves relative URLs against an optional base URL and adds default
/// headers to every request before handing it to the transport.
#[derive(Debug, Clone)]
pub struct FetchClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl<T: HttpTransport> FetchClient<T> {
    /// Create a new client over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        RequestBuilder::new(method, full_url).headers(self.default_headers.clone())
    }

    /// Send the request; non-2xx responses become [`FetchError::HttpError`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.transport.send(request).await?.error_for_status()
    }
}
