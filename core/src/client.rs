//! Stateless HTTP request builder and response parser for the User API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that validates its
//! input and produces an `HttpRequest`, and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the round-trip in between, which
//! keeps this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result, REQUEST_FAILED};
use crate::http::{merge_headers, HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::types::{CreateUser, UpdateUser, User, UserList};
use crate::validate;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Synchronous, stateless client for the User API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl Default for UserClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic request: `{base_url}{endpoint}` with JSON headers merged.
    pub fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            method: options.method,
            url: format!("{}{endpoint}", self.base_url),
            headers: merge_headers(&options.headers),
            body: options.body,
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.build_request("/health", RequestOptions::default())
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.build_request("/users", RequestOptions::default())
    }

    pub fn build_get_user(&self, user_id: i64) -> Result<HttpRequest> {
        validate::check_user_id(user_id)?;
        Ok(self.build_request(&format!("/users/{user_id}"), RequestOptions::default()))
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest> {
        validate::check_create(input)?;
        let options = RequestOptions::method(HttpMethod::Post).with_body(encode(input)?);
        Ok(self.build_request("/users", options))
    }

    pub fn build_update_user(&self, user_id: i64, input: &UpdateUser) -> Result<HttpRequest> {
        validate::check_update(user_id, input)?;
        let options = RequestOptions::method(HttpMethod::Put).with_body(encode(input)?);
        Ok(self.build_request(&format!("/users/{user_id}"), options))
    }

    pub fn build_delete_user(&self, user_id: i64) -> Result<HttpRequest> {
        validate::check_user_id(user_id)?;
        Ok(self.build_request(
            &format!("/users/{user_id}"),
            RequestOptions::method(HttpMethod::Delete),
        ))
    }

    /// Decode the body as JSON, then fail on a non-2xx status using the
    /// body's `error` field as the message.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        let data: Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if !response.is_success() {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(REQUEST_FAILED)
                .to_string();
            return Err(ApiError::Request {
                status: response.status,
                message,
            });
        }
        Ok(data)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Value> {
        self.parse_response(response)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>> {
        let list: UserList = decode(self.parse_response(response)?)?;
        Ok(list.users)
    }

    /// Shared by get, create and update.
    pub fn parse_user(&self, response: HttpResponse) -> Result<User> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<Value> {
        self.parse_response(response)
    }
}

fn encode<T: Serialize>(input: &T) -> Result<String> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}
