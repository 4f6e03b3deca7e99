use async_trait::async_trait;

use super::balances_model::{Balance, BalanceChanges, BalanceUpdate, NewBalance};
use crate::errors::Result;

/// Trait for balance repository operations
#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// The owner's active balance. With duplicates, the earliest created wins.
    fn find_active_for_owner(&self, owner_id: &str) -> Result<Option<Balance>>;
    /// The owner's most recently updated balance in any state.
    fn find_latest_for_owner(&self, owner_id: &str) -> Result<Option<Balance>>;
    async fn insert(&self, balance: Balance) -> Result<Balance>;
    async fn update(&self, balance_id: &str, changes: BalanceChanges) -> Result<Balance>;
}

/// Trait for balance service operations
#[async_trait]
pub trait BalanceServiceTrait: Send + Sync {
    fn get_balance(&self, owner_id: &str) -> Result<Balance>;
    async fn create_balance(&self, owner_id: &str, new_balance: NewBalance) -> Result<Balance>;
    async fn update_balance(&self, owner_id: &str, update: BalanceUpdate) -> Result<Balance>;
    async fn delete_balance(&self, owner_id: &str) -> Result<()>;
}
