//! Database models for records.
//!
//! Kind-specific attributes are stored as a JSON document in `details`, with
//! the kind duplicated into its own column for filtering.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{parse_column, parse_decimal};
use outlays_core::records::{Record, RecordDetails};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordDB {
    pub id: String,
    pub owner_id: String,
    pub kind: String,
    pub name: String,
    pub amount: String,
    pub details: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub(crate) fn encode_details(details: &RecordDetails) -> outlays_core::Result<String> {
    serde_json::to_string(details)
        .map_err(|e| StorageError::SerializationError(e.to_string()).into())
}

impl TryFrom<RecordDB> for Record {
    type Error = outlays_core::Error;

    fn try_from(db: RecordDB) -> Result<Self, Self::Error> {
        let details: RecordDetails = serde_json::from_str(&db.details).map_err(|e| {
            StorageError::SerializationError(format!("invalid details for record {}: {}", db.id, e))
        })?;
        Ok(Self {
            amount: parse_decimal(&db.amount, "records.amount")?,
            status: parse_column(&db.status, "records.status")?,
            details,
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<Record> for RecordDB {
    type Error = outlays_core::Error;

    fn try_from(domain: Record) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: domain.kind().as_str().to_string(),
            details: encode_details(&domain.details)?,
            id: domain.id,
            owner_id: domain.owner_id,
            name: domain.name,
            amount: domain.amount.to_string(),
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}
