//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::parse_column;
use outlays_core::users::User;

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserDB> for User {
    type Error = outlays_core::Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_column(&db.role, "users.role")?,
            status: parse_column(&db.status, "users.status")?,
            id: db.id,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            password_hash: db.password_hash,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<User> for UserDB {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            password_hash: domain.password_hash,
            role: domain.role.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
