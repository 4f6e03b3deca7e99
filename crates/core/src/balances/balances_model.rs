use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::LifecycleState;

/// An owner's cash balance. The amount may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub id: String,
    pub owner_id: String,
    pub amount: Decimal,
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBalance {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub amount: Option<Decimal>,
    pub status: Option<LifecycleState>,
}

/// Columns written by a user edit.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceChanges {
    /// `None` leaves the stored amount alone, so concurrent accruals are kept.
    pub amount: Option<Decimal>,
    pub status: LifecycleState,
    pub updated_at: NaiveDateTime,
}
