use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use rust_decimal_macros::dec;

use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{Movement, MovementRepositoryTrait, NewMovement};
use crate::obligations::{
    NewObligation, Obligation, ObligationChanges, ObligationKind, ObligationRepositoryTrait,
    ObligationService, ObligationServiceTrait, ObligationUpdate,
};

#[derive(Default)]
struct MockObligationRepository {
    obligations: Mutex<Vec<Obligation>>,
}

impl MockObligationRepository {
    fn backdate(&self, obligation_id: &str, anchor: NaiveDateTime) {
        let mut obligations = self.obligations.lock().unwrap();
        if let Some(o) = obligations.iter_mut().find(|o| o.id == obligation_id) {
            o.last_applied_at = anchor;
        }
    }
}

#[async_trait]
impl ObligationRepositoryTrait for MockObligationRepository {
    fn get_by_id(&self, obligation_id: &str) -> Result<Obligation> {
        self.obligations
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == obligation_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Obligation {}", obligation_id)))
    }

    fn list_active(&self, kind: ObligationKind) -> Result<Vec<Obligation>> {
        Ok(self
            .obligations
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.kind == kind && o.is_active())
            .cloned()
            .collect())
    }

    fn list_active_for_owner(
        &self,
        owner_id: &str,
        kind: ObligationKind,
    ) -> Result<Vec<Obligation>> {
        Ok(self
            .list_active(kind)?
            .into_iter()
            .filter(|o| o.owner_id == owner_id)
            .collect())
    }

    async fn insert(&self, obligation: Obligation) -> Result<Obligation> {
        self.obligations.lock().unwrap().push(obligation.clone());
        Ok(obligation)
    }

    async fn update(&self, obligation_id: &str, changes: ObligationChanges) -> Result<Obligation> {
        let mut obligations = self.obligations.lock().unwrap();
        let o = obligations
            .iter_mut()
            .find(|o| o.id == obligation_id)
            .ok_or_else(|| Error::NotFound(format!("Obligation {}", obligation_id)))?;
        o.name = changes.name;
        o.amount = changes.amount;
        o.cadence_days = changes.cadence_days;
        o.status = changes.status;
        o.updated_at = changes.updated_at;
        Ok(o.clone())
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

fn setup() -> (
    ObligationService,
    Arc<MockObligationRepository>,
    Arc<MockMovementRepository>,
) {
    let repository = Arc::new(MockObligationRepository::default());
    let movements = Arc::new(MockMovementRepository::default());
    let service = ObligationService::new(repository.clone(), movements.clone());
    (service, repository, movements)
}

fn salary() -> NewObligation {
    NewObligation {
        name: " Salary ".into(),
        amount: dec!(2500),
        cadence_days: 30,
    }
}

#[tokio::test]
async fn create_anchors_at_creation_time() {
    let (service, _, movements) = setup();
    let created = service
        .create_obligation("alice", ObligationKind::Income, salary())
        .await
        .unwrap();

    assert_eq!(created.name, "Salary");
    assert_eq!(created.status, LifecycleState::Active);
    assert_eq!(created.last_applied_at, created.created_at);
    assert_eq!(
        *movements.descriptions.lock().unwrap(),
        vec!["Created fixed income: Salary".to_string()]
    );
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (service, repository, _) = setup();
    let err = service
        .create_obligation(
            "alice",
            ObligationKind::Expense,
            NewObligation {
                cadence_days: 0,
                ..salary()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(repository.obligations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn edits_never_move_the_anchor() {
    let (service, repository, _) = setup();
    let created = service
        .create_obligation("alice", ObligationKind::Income, salary())
        .await
        .unwrap();
    let anchor = created.last_applied_at - Duration::days(45);
    repository.backdate(&created.id, anchor);

    let updated = service
        .update_obligation(
            "alice",
            ObligationKind::Income,
            &created.id,
            ObligationUpdate {
                amount: Some(dec!(2750.499)),
                cadence_days: Some(14),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(2750.50));
    assert_eq!(updated.cadence_days, 14);
    assert_eq!(updated.last_applied_at, anchor);
}

#[tokio::test]
async fn delete_then_reactivate_keeps_stale_anchor() {
    let (service, repository, movements) = setup();
    let created = service
        .create_obligation("alice", ObligationKind::Expense, salary())
        .await
        .unwrap();
    let anchor = created.last_applied_at - Duration::days(90);
    repository.backdate(&created.id, anchor);

    service
        .delete_obligation("alice", ObligationKind::Expense, &created.id)
        .await
        .unwrap();
    assert!(service
        .list_obligations("alice", ObligationKind::Expense)
        .unwrap()
        .is_empty());

    let reactivated = service
        .update_obligation(
            "alice",
            ObligationKind::Expense,
            &created.id,
            ObligationUpdate {
                status: Some(LifecycleState::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(reactivated.is_active());
    assert_eq!(reactivated.last_applied_at, anchor);

    let descriptions = movements.descriptions.lock().unwrap();
    assert_eq!(descriptions[1], "Deleted fixed expense: Salary");
    assert_eq!(descriptions[2], "Updated fixed expense: Salary");
}

#[tokio::test]
async fn foreign_or_mismatched_obligations_are_hidden() {
    let (service, _, _) = setup();
    let created = service
        .create_obligation("alice", ObligationKind::Income, salary())
        .await
        .unwrap();

    let err = service
        .delete_obligation("mallory", ObligationKind::Income, &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(ref what) if what == "Fixed income"));

    let err = service
        .update_obligation(
            "alice",
            ObligationKind::Expense,
            &created.id,
            ObligationUpdate::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = service
        .delete_obligation("alice", ObligationKind::Income, "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
