use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{Movement, MovementRepositoryTrait, NewMovement};
use crate::records::{
    NewRecord, Record, RecordChanges, RecordDetails, RecordKind, RecordRepositoryTrait,
    RecordService, RecordServiceTrait, RecordUpdate,
};

#[derive(Default)]
struct MockRecordRepository {
    records: Mutex<Vec<Record>>,
}

#[async_trait]
impl RecordRepositoryTrait for MockRecordRepository {
    fn get_by_id(&self, record_id: &str) -> Result<Record> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Record {}", record_id)))
    }

    fn list_active_for_owner(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id && r.kind() == kind && r.status.is_active())
            .cloned()
            .collect())
    }

    async fn insert(&self, record: Record) -> Result<Record> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record_id: &str, changes: RecordChanges) -> Result<Record> {
        let mut records = self.records.lock().unwrap();
        let r = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::NotFound(format!("Record {}", record_id)))?;
        r.name = changes.name;
        r.amount = changes.amount;
        r.details = changes.details;
        r.status = changes.status;
        r.updated_at = changes.updated_at;
        Ok(r.clone())
    }
}

#[derive(Default)]
struct MockMovementRepository {
    descriptions: Mutex<Vec<String>>,
}

#[async_trait]
impl MovementRepositoryTrait for MockMovementRepository {
    async fn insert(&self, movement: NewMovement) -> Result<Movement> {
        self.descriptions
            .lock()
            .unwrap()
            .push(movement.description.clone());
        Ok(Movement {
            id: "m".into(),
            owner_id: movement.owner_id,
            description: movement.description,
            created_at: movement.created_at,
        })
    }

    fn list_for_owner(&self, _owner_id: &str, _limit: i64) -> Result<Vec<Movement>> {
        unimplemented!()
    }
}

fn setup() -> (RecordService, Arc<MockMovementRepository>) {
    let movements = Arc::new(MockMovementRepository::default());
    let service = RecordService::new(
        Arc::new(MockRecordRepository::default()),
        movements.clone(),
    );
    (service, movements)
}

fn groceries() -> NewRecord {
    NewRecord {
        name: "Groceries".into(),
        amount: dec!(82.349),
        details: RecordDetails::VariableExpense {
            paid_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        },
    }
}

#[tokio::test]
async fn create_normalizes_and_logs() {
    let (service, movements) = setup();
    let record = service
        .create_record("alice", RecordKind::VariableExpense, groceries())
        .await
        .unwrap();
    assert_eq!(record.amount, dec!(82.35));
    assert_eq!(record.kind(), RecordKind::VariableExpense);
    assert_eq!(
        *movements.descriptions.lock().unwrap(),
        vec!["Created variable expense: Groceries".to_string()]
    );
}

#[tokio::test]
async fn details_must_match_collection() {
    let (service, _) = setup();
    let err = service
        .create_record("alice", RecordKind::Saving, groceries())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn update_and_delete_are_owner_scoped() {
    let (service, _) = setup();
    let record = service
        .create_record("alice", RecordKind::VariableExpense, groceries())
        .await
        .unwrap();

    let err = service
        .update_record(
            "bob",
            RecordKind::VariableExpense,
            &record.id,
            RecordUpdate::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let updated = service
        .update_record(
            "alice",
            RecordKind::VariableExpense,
            &record.id,
            RecordUpdate {
                amount: Some(dec!(90)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(90));
    assert_eq!(updated.details, record.details);

    service
        .delete_record("alice", RecordKind::VariableExpense, &record.id)
        .await
        .unwrap();
    assert!(service
        .list_records("alice", RecordKind::VariableExpense)
        .unwrap()
        .is_empty());

    let revived = service
        .update_record(
            "alice",
            RecordKind::VariableExpense,
            &record.id,
            RecordUpdate {
                status: Some(LifecycleState::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(revived.status.is_active());
}

#[tokio::test]
async fn negative_amounts_are_rejected() {
    let (service, _) = setup();
    let err = service
        .create_record(
            "alice",
            RecordKind::Saving,
            NewRecord {
                name: "Rainy day".into(),
                amount: dec!(-5),
                details: RecordDetails::Saving,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
