use async_trait::async_trait;

use super::obligations_model::{
    NewObligation, Obligation, ObligationChanges, ObligationKind, ObligationUpdate,
};
use crate::errors::Result;

/// Trait for obligation repository operations
#[async_trait]
pub trait ObligationRepositoryTrait: Send + Sync {
    fn get_by_id(&self, obligation_id: &str) -> Result<Obligation>;
    /// Every active obligation of `kind`, across all owners. Unordered.
    fn list_active(&self, kind: ObligationKind) -> Result<Vec<Obligation>>;
    fn list_active_for_owner(&self, owner_id: &str, kind: ObligationKind)
        -> Result<Vec<Obligation>>;
    async fn insert(&self, obligation: Obligation) -> Result<Obligation>;
    async fn update(&self, obligation_id: &str, changes: ObligationChanges) -> Result<Obligation>;
}

/// Trait for obligation service operations
#[async_trait]
pub trait ObligationServiceTrait: Send + Sync {
    fn list_obligations(&self, owner_id: &str, kind: ObligationKind) -> Result<Vec<Obligation>>;
    async fn create_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        new_obligation: NewObligation,
    ) -> Result<Obligation>;
    async fn update_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        obligation_id: &str,
        update: ObligationUpdate,
    ) -> Result<Obligation>;
    async fn delete_obligation(
        &self,
        owner_id: &str,
        kind: ObligationKind,
        obligation_id: &str,
    ) -> Result<()>;
}
