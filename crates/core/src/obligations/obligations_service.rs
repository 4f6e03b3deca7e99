use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::obligations_model::{
    NewObligation, Obligation, ObligationChanges, ObligationKind, ObligationUpdate,
};
use super::obligations_traits::{ObligationRepositoryTrait, ObligationServiceTrait};
use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{record_movement, MovementRepositoryTrait, NewMovement};
use crate::utils::money::normalize_amount;
use crate::utils::time_utils::now_utc;

/// Owner-facing management of fixed incomes and expenses.
pub struct ObligationService {
    repository: Arc<dyn ObligationRepositoryTrait>,
    movements: Arc<dyn MovementRepositoryTrait>,
}

impl ObligationService {
    pub fn new(
        repository: Arc<dyn ObligationRepositoryTrait>,
        movements: Arc<dyn MovementRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            movements,
        }
    }

    /// Loads an obligation and hides it unless it belongs to `owner_id` and has `kind`.
    fn get_owned(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        obligation_id: &str,
    ) -> Result<Obligation> {
        let not_found = || Error::NotFound(kind.title().to_string());
        let obligation = match self.repository.get_by_id(obligation_id) {
            Err(Error::NotFound(_)) => return Err(not_found()),
            other => other?,
        };
        if obligation.owner_id != owner_id || obligation.kind != kind {
            return Err(not_found());
        }
        Ok(obligation)
    }

    async fn apply_changes(
        &self,
        current: &Obligation,
        changes: ObligationChanges,
        verb: &str,
    ) -> Result<Obligation> {
        let updated_at = changes.updated_at;
        let updated = self.repository.update(&current.id, changes).await?;
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(
                &current.owner_id,
                format!("{} {}: {}", verb, current.kind.label(), updated.name),
                updated_at,
            ),
        )
        .await;
        Ok(updated)
    }
}

#[async_trait]
impl ObligationServiceTrait for ObligationService {
    fn list_obligations(&self, owner_id: &str, kind: ObligationKind) -> Result<Vec<Obligation>> {
        self.repository.list_active_for_owner(owner_id, kind)
    }

    async fn create_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        new_obligation: NewObligation,
    ) -> Result<Obligation> {
        let amount = new_obligation.validate()?;
        let now = now_utc();
        let obligation = Obligation {
            id: Uuid::now_v7().to_string(),
            owner_id: owner_id.to_string(),
            kind,
            name: new_obligation.name.trim().to_string(),
            amount,
            cadence_days: new_obligation.cadence_days,
            last_applied_at: now,
            status: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert(obligation).await?;
        debug!("Created {} {} for {}", kind.label(), created.id, owner_id);
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

    async fn update_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        obligation_id: &str,
        update: ObligationUpdate,
    ) -> Result<Obligation> {
        update.validate()?;
        let current = self.get_owned(owner_id, kind, obligation_id)?;
        let changes = ObligationChanges {
            name: update
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| current.name.clone()),
            amount: update
                .amount
                .map(normalize_amount)
                .unwrap_or(current.amount),
            cadence_days: update.cadence_days.unwrap_or(current.cadence_days),
            status: update.status.unwrap_or(current.status),
            updated_at: now_utc(),
        };
        self.apply_changes(&current, changes, "Updated").await
    }

    async fn delete_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        obligation_id: &str,
    ) -> Result<()> {
        let current = self.get_owned(owner_id, kind, obligation_id)?;
        let changes = ObligationChanges {
            name: current.name.clone(),
            amount: current.amount,
            cadence_days: current.cadence_days,
            status: LifecycleState::Inactive,
            updated_at: now_utc(),
        };
        self.apply_changes(&current, changes, "Deleted").await?;
        Ok(())
    }
}
