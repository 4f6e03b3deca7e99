//! Database models for movements.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use outlays_core::movements::{Movement, NewMovement};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::movements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MovementDB {
    pub id: String,
    pub owner_id: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl From<MovementDB> for Movement {
    fn from(db: MovementDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            description: db.description,
            created_at: db.created_at,
        }
    }
}

impl From<NewMovement> for MovementDB {
    fn from(domain: NewMovement) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            owner_id: domain.owner_id,
            description: domain.description,
            created_at: domain.created_at,
        }
    }
}
