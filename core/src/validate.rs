//! Client-side input checks run before a request is built.
//!
//! The email pattern is a loose syntactic check (`local@domain.tld`), not RFC
//! 5322 validation. It accepts addresses such as `a@b..cd` and rejects quoted
//! local parts or internationalized domains; keep the boundary as is.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiError, Result, INVALID_EMAIL, INVALID_USER_ID, MISSING_FIELDS};
use crate::types::{CreateUser, UpdateUser};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn check_user_id(user_id: i64) -> Result<()> {
    if user_id <= 0 {
        return Err(ApiError::validation(INVALID_USER_ID));
    }
    Ok(())
}

pub fn check_create(input: &CreateUser) -> Result<()> {
    if input.username.is_empty() || input.email.is_empty() {
        return Err(ApiError::validation(MISSING_FIELDS));
    }
    if !is_valid_email(&input.email) {
        return Err(ApiError::validation(INVALID_EMAIL));
    }
    Ok(())
}

/// An empty email counts as "not supplied" and is not checked.
pub fn check_update(user_id: i64, input: &UpdateUser) -> Result<()> {
    check_user_id(user_id)?;
    match input.email.as_deref() {
        Some(email) if !email.is_empty() && !is_valid_email(email) => {
            Err(ApiError::validation(INVALID_EMAIL))
        }
        _ => Ok(()),
    }
}
