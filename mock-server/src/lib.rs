use std::{collections::BTreeMap, sync::Arc, sync::LazyLock};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};

pub const NOT_FOUND: &str = "Пользователь не найден";
pub const ROUTE_NOT_FOUND: &str = "Endpoint не найден";
pub const JSON_REQUIRED: &str = "Требуется JSON";
pub const FIELDS_REQUIRED: &str = "Требуются поля username и email";
pub const USERNAME_TOO_SHORT: &str = "username должен содержать минимум 3 символа";
pub const INVALID_EMAIL: &str = "Некорректный email адрес";
pub const DELETED: &str = "Пользователь удален";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// In-memory user table. Ids are assigned sequentially from 1 and never
/// reused.
#[derive(Debug)]
pub struct Store {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.user_id) != except)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// JSON error body `{"error": message}` with a status.
pub struct ApiError(StatusCode, String);

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError(StatusCode::BAD_REQUEST, message.into())
    }

    fn not_found() -> Self {
        ApiError(StatusCode::NOT_FOUND, NOT_FOUND.to_string())
    }

    fn route_not_found() -> Self {
        ApiError(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND.to_string())
    }
}

/// Only unsigned decimal ids match `/users/{id}`; anything else is an unknown
/// route.
fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) if id >= 0 => Ok(id),
        _ => Err(ApiError::route_not_found()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = self.0.as_u16(), error = %self.1, "request rejected");
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .fallback(route_not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validate(username: &str, email: &str) -> Result<(), ApiError> {
    if username.chars().count() < 3 {
        return Err(ApiError::bad_request(USERNAME_TOO_SHORT));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ApiError::bad_request(INVALID_EMAIL));
    }
    Ok(())
}

fn duplicate_email(email: &str) -> ApiError {
    ApiError::bad_request(format!("Пользователь с email {email} уже существует"))
}

async fn health(State(db): State<Db>) -> Json<Value> {
    debug!("health check");
    let store = db.read().await;
    Json(json!({
        "status": "healthy",
        "service": "user-api",
        "version": "1.0.0",
        "users_count": store.users.len(),
    }))
}

async fn list_users(State(db): State<Db>) -> Json<Value> {
    debug!("list users");
    let store = db.read().await;
    let users: Vec<&User> = store.users.values().collect();
    Json(json!({ "users": users, "count": users.len() }))
}

async fn get_user(
    State(db): State<Db>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;
    debug!(id, "get user");
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(ApiError::not_found)
}

async fn create_user(
    State(db): State<Db>,
    input: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!("create user");
    let Json(input) = input.map_err(|_| ApiError::bad_request(JSON_REQUIRED))?;
    let (username, email) = match (input.username, input.email) {
        (Some(u), Some(e)) if !u.is_empty() && !e.is_empty() => (u, e),
        _ => return Err(ApiError::bad_request(FIELDS_REQUIRED)),
    };

    let mut store = db.write().await;
    if store.email_taken(&email, None) {
        return Err(duplicate_email(&email));
    }
    validate(&username, &email)?;

    let user = User {
        user_id: store.next_id,
        username,
        email,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    };
    store.next_id += 1;
    store.users.insert(user.user_id, user.clone());
    info!(user_id = user.user_id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(db): State<Db>,
    path: Result<Path<i64>, PathRejection>,
    input: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;
    debug!(id, "update user");
    let Json(input) = input.map_err(|_| ApiError::bad_request(JSON_REQUIRED))?;
    if input.username.is_none() && input.email.is_none() {
        return Err(ApiError::bad_request(JSON_REQUIRED));
    }

    let mut store = db.write().await;
    let current = store.users.get(&id).cloned().ok_or_else(ApiError::not_found)?;

    let username = input.username.filter(|u| !u.is_empty()).unwrap_or(current.username);
    let email = input.email.filter(|e| !e.is_empty()).unwrap_or(current.email);
    if store.email_taken(&email, Some(id)) {
        return Err(duplicate_email(&email));
    }
    validate(&username, &email)?;

    let updated = User {
        username,
        email,
        ..current
    };
    store.users.insert(id, updated.clone());
    Ok(Json(updated))
}

async fn delete_user(
    State(db): State<Db>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = user_id(path)?;
    debug!(id, "delete user");
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| Json(json!({ "message": DELETED })))
        .ok_or_else(ApiError::not_found)
}

async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}
