use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::records_model::{NewRecord, Record, RecordChanges, RecordKind, RecordUpdate};
use super::records_traits::{RecordRepositoryTrait, RecordServiceTrait};
use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{record_movement, MovementRepositoryTrait, NewMovement};
use crate::utils::money::require_non_negative;
use crate::utils::time_utils::now_utc;

pub struct RecordService {
    repository: Arc<dyn RecordRepositoryTrait>,
    movements: Arc<dyn MovementRepositoryTrait>,
}

impl RecordService {
    pub fn new(
        repository: Arc<dyn RecordRepositoryTrait>,
        movements: Arc<dyn MovementRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            movements,
        }
    }

    fn get_owned(&self, owner_id: &str, kind: RecordKind, record_id: &str) -> Result<Record> {
        let not_found = || Error::NotFound(format!("Record {}", record_id));
        let record = match self.repository.get_by_id(record_id) {
            Err(Error::NotFound(_)) => return Err(not_found()),
            other => other?,
        };
        if record.owner_id != owner_id || record.kind() != kind {
            return Err(not_found());
        }
        Ok(record)
    }

    async fn store_changes(
        &self,
        current: &Record,
        changes: RecordChanges,
        verb: &str,
    ) -> Result<Record> {
        let at = changes.updated_at;
        let updated = self.repository.update(&current.id, changes).await?;
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(
                &current.owner_id,
                format!("{} {}: {}", verb, current.kind().label(), updated.name),
                at,
            ),
        )
        .await;
        Ok(updated)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input("Name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl RecordServiceTrait for RecordService {
    fn list_records(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>> {
        self.repository.list_active_for_owner(owner_id, kind)
    }

    async fn create_record(
        &self,
        owner_id: &str,
        kind: RecordKind,
        new_record: NewRecord,
    ) -> Result<Record> {
        new_record.details.expect_kind(kind)?;
        let name = validate_name(&new_record.name)?;
        let amount = require_non_negative("Amount", new_record.amount)?;
        let details = new_record.details.normalized()?;

        let now = now_utc();
        let record = Record {
            id: Uuid::now_v7().to_string(),
            owner_id: owner_id.to_string(),
            name,
            amount,
            details,
            status: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert(record).await?;
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(
                owner_id,
                format!("Created {}: {}", kind.label(), created.name),
                now,
            ),
        )
        .await;
        Ok(created)
    }

    async fn update_record(
        &self,
        owner_id: &str,
        kind: RecordKind,
        record_id: &str,
        update: RecordUpdate,
    ) -> Result<Record> {
        if let Some(details) = &update.details {
            details.expect_kind(kind)?;
        }
        let current = self.get_owned(owner_id, kind, record_id)?;
        let changes = RecordChanges {
            name: match update.name {
                Some(name) => validate_name(&name)?,
                None => current.name.clone(),
            },
            amount: match update.amount {
                Some(amount) => require_non_negative("Amount", amount)?,
                None => current.amount,
            },
            details: match update.details {
                Some(details) => details.normalized()?,
                None => current.details.clone(),
            },
            status: update.status.unwrap_or(current.status),
            updated_at: now_utc(),
        };
        self.store_changes(&current, changes, "Updated").await
    }

    async fn delete_record(
        &self,
        owner_id: &str,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<()> {
        let current = self.get_owned(owner_id, kind, record_id)?;
        let changes = RecordChanges {
            name: current.name.clone(),
            amount: current.amount,
            details: current.details.clone(),
            status: LifecycleState::Inactive,
            updated_at: now_utc(),
        };
        self.store_changes(&current, changes, "Deleted").await?;
        Ok(())
    }
}
