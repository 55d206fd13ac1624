//! Transport seam for outbound HTTP.

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Sends HTTP requests.
///
/// The block never opens connections itself; the host provides a transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}
