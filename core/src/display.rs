//! Console rendering for user records.
//!
//! Dates are rendered in the ru-RU long form ("1 января 2024 г. в 10:00")
//! in UTC, so output does not depend on the host timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::types::User;

pub const USERS_HEADER: &str = "=== Список пользователей ===";
pub const NO_USERS: &str = "Нет пользователей";
pub const INVALID_DATE: &str = "Invalid Date";

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Accepts RFC 3339, or ISO 8601 without an offset (read as UTC), or a bare
/// date (midnight UTC).
fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_date(input: &str) -> String {
    match parse_timestamp(input) {
        Some(dt) => format!(
            "{} {} {} г. в {:02}:{:02}",
            dt.day(),
            MONTHS_GENITIVE[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => INVALID_DATE.to_string(),
    }
}

/// One block per user, each closed by a `---` line. An empty slice renders
/// as the "no users" message alone.
pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return NO_USERS.to_string();
    }
    users
        .iter()
        .map(|user| {
            format!(
                "ID: {}\nUsername: {}\nEmail: {}\nCreated: {}\n---\n",
                user.user_id,
                user.username,
                user.email,
                format_date(&user.created_at)
            )
        })
        .collect()
}

pub fn display_users(users: &[User]) {
    println!("\n{USERS_HEADER}");
    println!("{}", render_users(users));
}
