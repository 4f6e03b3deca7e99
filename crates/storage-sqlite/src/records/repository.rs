use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{encode_details, RecordDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::records;
use outlays_core::errors::{Error, Result};
use outlays_core::records::{Record, RecordChanges, RecordKind, RecordRepositoryTrait};
use outlays_core::LifecycleState;

pub struct RecordRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RecordRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        RecordRepository { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait for RecordRepository {
    fn get_by_id(&self, record_id: &str) -> Result<Record> {
        let mut conn = get_connection(&self.pool)?;
        records::table
            .find(record_id)
            .select(RecordDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Record {}", record_id)))
            .and_then(Record::try_from)
    }

    fn list_active_for_owner(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>> {
        let mut conn = get_connection(&self.pool)?;
        records::table
            .filter(records::owner_id.eq(owner_id))
            .filter(records::kind.eq(kind.as_str()))
            .filter(records::status.eq(LifecycleState::Active.as_str()))
            .order((records::created_at.asc(), records::id.asc()))
            .select(RecordDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Record::try_from)
            .collect()
    }

    async fn insert(&self, record: Record) -> Result<Record> {
        let record_db = RecordDB::try_from(record)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Record> {
                let inserted = diesel::insert_into(records::table)
                    .values(&record_db)
                    .returning(RecordDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Record::try_from(inserted)
            })
            .await
    }

    async fn update(&self, record_id: &str, changes: RecordChanges) -> Result<Record> {
        let record_id = record_id.to_string();
        let details = encode_details(&changes.details)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Record> {
                // The kind is fixed at creation; only the document changes.
                let updated = diesel::update(records::table.find(&record_id))
                    .set((
                        records::name.eq(changes.name),
                        records::amount.eq(changes.amount.to_string()),
                        records::details.eq(details),
                        records::status.eq(changes.status.as_str()),
                        records::updated_at.eq(changes.updated_at),
                    ))
                    .returning(RecordDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Record {}", record_id)))?;
                Record::try_from(updated)
            })
            .await
    }
}
