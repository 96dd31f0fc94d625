//! Async User API client: `UserClient` plus an `HttpTransport`.
//!
//! Each call is one independent request/response exchange. There is no retry,
//! backoff, timeout or shared mutable state; concurrent calls on the same
//! client are fine.

use serde_json::Value;
use tracing::{debug, error};

use crate::client::UserClient;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse, RequestOptions};
use crate::transport::HttpTransport;
use crate::types::{CreateUser, UpdateUser, User};

pub struct ApiClient<T> {
    inner: UserClient,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl ApiClient<crate::transport::ReqwestTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, crate::transport::ReqwestTransport::new())
    }
}

#[cfg(feature = "reqwest")]
impl Default for ApiClient<crate::transport::ReqwestTransport> {
    fn default() -> Self {
        Self::new(crate::client::DEFAULT_BASE_URL)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            inner: UserClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `{base_url}{endpoint}` and return the decoded JSON body.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let request = self.inner.build_request(endpoint, options);
        self.send(request, UserClient::parse_response).await
    }

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let request = self.inner.build_list_users();
        self.send(request, UserClient::parse_list_users).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        let request = self.inner.build_get_user(user_id)?;
        self.send(request, UserClient::parse_user).await
    }

    pub async fn create_user(&self, input: &CreateUser) -> Result<User> {
        let request = self.inner.build_create_user(input)?;
        self.send(request, UserClient::parse_user).await
    }

    pub async fn update_user(&self, user_id: i64, input: &UpdateUser) -> Result<User> {
        let request = self.inner.build_update_user(user_id, input)?;
        self.send(request, UserClient::parse_user).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<Value> {
        let request = self.inner.build_delete_user(user_id)?;
        self.send(request, UserClient::parse_delete_user).await
    }

    pub async fn check_health(&self) -> Result<Value> {
        let request = self.inner.build_health();
        self.send(request, UserClient::parse_health).await
    }

    async fn send<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&UserClient, HttpResponse) -> Result<R>,
    ) -> Result<R> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, %url, "sending request");

        let outcome = match self.transport.execute(request).await {
            Ok(response) => {
                debug!(method, %url, status = response.status, "received response");
                parse(&self.inner, response)
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            error!(method, %url, error = %e, "API request failed");
        }
        outcome
    }
}
