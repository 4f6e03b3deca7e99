use async_trait::async_trait;

use super::accrual_model::{AccrualApplyResult, AccrualRequest};
use crate::errors::Result;

/// Atomic write side of an accrual.
#[async_trait]
pub trait AccrualLedgerTrait: Send + Sync {
    /// In one transaction: find the owner's active balance, advance the
    /// obligation's anchor if it still equals `expected_last_applied_at`,
    /// add `delta` to the balance and append a movement.
    ///
    /// Must write nothing unless it returns `Applied`.
    async fn apply_accrual(&self, request: AccrualRequest) -> Result<AccrualApplyResult>;
}
