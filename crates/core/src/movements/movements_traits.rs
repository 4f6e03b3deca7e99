use async_trait::async_trait;
use log::warn;

use super::movements_model::{Movement, NewMovement};
use crate::errors::Result;

/// Trait for movement repository operations
#[async_trait]
pub trait MovementRepositoryTrait: Send + Sync {
    async fn insert(&self, movement: NewMovement) -> Result<Movement>;
    /// Newest first.
    fn list_for_owner(&self, owner_id: &str, limit: i64) -> Result<Vec<Movement>>;
}

/// Appends an audit entry after a mutation has already been committed.
///
/// A failure here is logged and swallowed: the mutation it describes stands.
pub async fn record_movement(repository: &dyn MovementRepositoryTrait, movement: NewMovement) {
    let owner_id = movement.owner_id.clone();
    if let Err(e) = repository.insert(movement).await {
        warn!("Failed to record movement for user {}: {}", owner_id, e);
    }
}
