//! Fixtures shared by the repository tests.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::RunQueryDsl;

use crate::db::{get_connection, DbPool};

/// 09:00 on the given day of January 2024.
pub fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Creates a user row so owned rows satisfy their foreign keys.
pub fn insert_user(pool: &DbPool, user_id: &str) {
    let mut conn = get_connection(pool).expect("Failed to get connection");
    diesel::sql_query(format!(
        "INSERT INTO users (id, first_name, last_name, email, password_hash, role, status, created_at, updated_at) \
         VALUES ('{0}', 'Test', 'User', '{0}@example.com', 'hash', 'user', 'active', datetime('now'), datetime('now'))",
        user_id
    ))
    .execute(&mut conn)
    .expect("Failed to create test user");
}
