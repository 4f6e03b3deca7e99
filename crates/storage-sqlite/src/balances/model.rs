//! Database models for balances.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_column, parse_decimal};
use outlays_core::balances::{Balance, BalanceChanges};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceDB {
    pub id: String,
    pub owner_id: String,
    pub amount: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BalanceDB> for Balance {
    type Error = outlays_core::Error;

    fn try_from(db: BalanceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "balances.amount")?,
            status: parse_column(&db.status, "balances.status")?,
            id: db.id,
            owner_id: db.owner_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Balance> for BalanceDB {
    fn from(domain: Balance) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            amount: domain.amount.to_string(),
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

/// Update set for a balance row. A `None` amount is skipped by diesel.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
pub struct BalanceChangesDB {
    pub amount: Option<String>,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl From<BalanceChanges> for BalanceChangesDB {
    fn from(changes: BalanceChanges) -> Self {
        Self {
            amount: changes.amount.map(|amount| amount.to_string()),
            status: changes.status.as_str().to_string(),
            updated_at: changes.updated_at,
        }
    }
}
