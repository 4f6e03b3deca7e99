use async_trait::async_trait;

use super::records_model::{NewRecord, Record, RecordChanges, RecordKind, RecordUpdate};
use crate::errors::Result;

/// Trait for record repository operations
#[async_trait]
pub trait RecordRepositoryTrait: Send + Sync {
    fn get_by_id(&self, record_id: &str) -> Result<Record>;
    /// Active records of one kind, oldest first.
    fn list_active_for_owner(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>>;
    async fn insert(&self, record: Record) -> Result<Record>;
    async fn update(&self, record_id: &str, changes: RecordChanges) -> Result<Record>;
}

/// Trait for record service operations
#[async_trait]
pub trait RecordServiceTrait: Send + Sync {
    fn list_records(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>>;
    async fn create_record(
        &self,
        owner_id: &str,
        kind: RecordKind,
        new_record: NewRecord,
    ) -> Result<Record>;
    async fn update_record(
        &self,
        owner_id: &str,
        kind: RecordKind,
        record_id: &str,
        update: RecordUpdate,
    ) -> Result<Record>;
    async fn delete_record(&self, owner_id: &str, kind: RecordKind, record_id: &str)
        -> Result<()>;
}
