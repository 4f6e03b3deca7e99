use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::balances_model::{Balance, BalanceChanges, BalanceUpdate, NewBalance};
use super::balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{record_movement, MovementRepositoryTrait, NewMovement};
use crate::utils::money::normalize_amount;
use crate::utils::time_utils::now_utc;

pub struct BalanceService {
    repository: Arc<dyn BalanceRepositoryTrait>,
    movements: Arc<dyn MovementRepositoryTrait>,
}

impl BalanceService {
    pub fn new(
        repository: Arc<dyn BalanceRepositoryTrait>,
        movements: Arc<dyn MovementRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            movements,
        }
    }

    fn not_found() -> Error {
        Error::NotFound("Balance".to_string())
    }

    async fn log(&self, owner_id: &str, description: &str, at: chrono::NaiveDateTime) {
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(owner_id, description, at),
        )
        .await;
    }
}

#[async_trait]
impl BalanceServiceTrait for BalanceService {
    fn get_balance(&self, owner_id: &str) -> Result<Balance> {
        self.repository
            .find_active_for_owner(owner_id)?
            .ok_or_else(Self::not_found)
    }

    async fn create_balance(&self, owner_id: &str, new_balance: NewBalance) -> Result<Balance> {
        if self.repository.find_active_for_owner(owner_id)?.is_some() {
            return Err(Error::ConstraintViolation(
                "An active balance already exists".to_string(),
            ));
        }
        let now = now_utc();
        let balance = Balance {
            id: Uuid::now_v7().to_string(),
            owner_id: owner_id.to_string(),
            amount: normalize_amount(new_balance.amount),
            status: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert(balance).await?;
        self.log(owner_id, "Created balance", now).await;
        Ok(created)
    }

    async fn update_balance(&self, owner_id: &str, update: BalanceUpdate) -> Result<Balance> {
        let current = match self.repository.find_active_for_owner(owner_id)? {
            Some(active) => active,
            None => self
                .repository
                .find_latest_for_owner(owner_id)?
                .ok_or_else(Self::not_found)?,
        };
        let now = now_utc();
        let changes = BalanceChanges {
            amount: update.amount.map(normalize_amount),
            status: update.status.unwrap_or(current.status),
            updated_at: now,
        };
        let updated = self.repository.update(&current.id, changes).await?;
        self.log(owner_id, "Updated balance", now).await;
        Ok(updated)
    }

    async fn delete_balance(&self, owner_id: &str) -> Result<()> {
        let current = self
            .repository
            .find_active_for_owner(owner_id)?
            .ok_or_else(Self::not_found)?;
        let now = now_utc();
        self.repository
            .update(
                &current.id,
                BalanceChanges {
                    amount: None,
                    status: LifecycleState::Inactive,
                    updated_at: now,
                },
            )
            .await?;
        self.log(owner_id, "Deleted balance", now).await;
        Ok(())
    }
}
