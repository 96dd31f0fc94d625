//! Async transport seam between `ApiClient` and an HTTP library.
//!
//! Implementations return every HTTP response as data, including 4xx/5xx, so
//! status interpretation stays in `UserClient::parse_response`. Only failures
//! that produce no response at all map to `ApiError::Transport`.

use async_trait::async_trait;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one `HttpRequest`.
///
/// ```ignore
/// use async_trait::async_trait;
/// use user_api_core::{HttpRequest, HttpResponse, HttpTransport, Result};
///
/// struct MyTransport;
///
/// #[async_trait]
/// impl HttpTransport for MyTransport {
///     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
///         // send `request` with your HTTP library
///         Ok(HttpResponse::new(200, "{}"))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use async_trait::async_trait;

    use super::HttpTransport;
    use crate::error::{ApiError, Result};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `HttpTransport` over `reqwest::Client`. No timeout is set; a hung
    /// server blocks the call.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                ApiError::Transport(format!("{} {}: {e}", request.method.as_str(), request.url))
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }
}
