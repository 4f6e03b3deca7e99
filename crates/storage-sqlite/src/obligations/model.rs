//! Database models for fixed incomes and fixed expenses.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_column, parse_decimal};
use outlays_core::obligations::Obligation;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::obligations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ObligationDB {
    pub id: String,
    pub owner_id: String,
    pub kind: String,
    pub name: String,
    pub amount: String,
    pub cadence_days: i32,
    pub last_applied_at: NaiveDateTime,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ObligationDB> for Obligation {
    type Error = outlays_core::Error;

    fn try_from(db: ObligationDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_column(&db.kind, "obligations.kind")?,
            amount: parse_decimal(&db.amount, "obligations.amount")?,
            status: parse_column(&db.status, "obligations.status")?,
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            cadence_days: db.cadence_days,
            last_applied_at: db.last_applied_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Obligation> for ObligationDB {
    fn from(domain: Obligation) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            kind: domain.kind.as_str().to_string(),
            name: domain.name,
            amount: domain.amount.to_string(),
            cadence_days: domain.cadence_days,
            last_applied_at: domain.last_applied_at,
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
