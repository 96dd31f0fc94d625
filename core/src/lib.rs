//! Client core for the User REST API.
//!
//! # Overview
//! CRUD calls over `/users`, a `/health` probe, client-side validation of ids
//! and emails, and console rendering of user records.
//!
//! # Design
//! - `UserClient` is stateless and does no I/O: `build_*` validates input and
//!   produces an `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `ApiClient` pairs a `UserClient` with an `HttpTransport` and exposes the
//!   async operations. `ReqwestTransport` is the default transport.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod display;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validate;

pub use api::ApiClient;
pub use client::{UserClient, DEFAULT_BASE_URL};
pub use display::{display_users, format_date, render_users};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::HttpTransport;
pub use types::{CreateUser, UpdateUser, User, UserList};
pub use validate::is_valid_email;
