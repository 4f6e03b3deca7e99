use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::obligations::{Obligation, ObligationKind};

/// One due obligation, ready to be applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct AccrualRequest {
    pub obligation_id: String,
    pub owner_id: String,
    pub kind: ObligationKind,
    pub name: String,
    /// Signed balance change: positive for incomes, negative for expenses.
    pub delta: Decimal,
    /// Anchor observed when the obligation was judged due. The write only
    /// goes through if the stored anchor still matches.
    pub expected_last_applied_at: NaiveDateTime,
    pub applied_at: NaiveDateTime,
}

impl AccrualRequest {
    pub fn for_obligation(obligation: &Obligation, applied_at: NaiveDateTime) -> Self {
        Self {
            obligation_id: obligation.id.clone(),
            owner_id: obligation.owner_id.clone(),
            kind: obligation.kind,
            name: obligation.name.clone(),
            delta: obligation.kind.signed(obligation.amount),
            expected_last_applied_at: obligation.last_applied_at,
            applied_at,
        }
    }

    /// Audit line written alongside the balance change.
    pub fn movement_description(&self) -> String {
        format!("Applied {}: {}", self.kind.label(), self.name)
    }
}

/// What the ledger did with an [`AccrualRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum AccrualApplyResult {
    Applied {
        balance_id: String,
        new_amount: Decimal,
    },
    /// The owner has no active balance. Nothing was written.
    MissingBalance,
    /// The obligation was deactivated or already advanced. Nothing was written.
    Stale,
}

/// Per-obligation result of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ObligationOutcome {
    NotDue,
    Applied { new_amount: Decimal },
    MissingBalance,
    Stale,
    Failed(String),
    TimedOut,
}

impl From<AccrualApplyResult> for ObligationOutcome {
    fn from(result: AccrualApplyResult) -> Self {
        match result {
            AccrualApplyResult::Applied { new_amount, .. } => {
                ObligationOutcome::Applied { new_amount }
            }
            AccrualApplyResult::MissingBalance => ObligationOutcome::MissingBalance,
            AccrualApplyResult::Stale => ObligationOutcome::Stale,
        }
    }
}

/// Tally of one accrual cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub started_at: NaiveDateTime,
    /// Clock time at the end of the cycle, never before `started_at`.
    pub finished_at: Option<NaiveDateTime>,
    pub evaluated: usize,
    pub applied: usize,
    pub not_due: usize,
    pub missing_balance: usize,
    pub stale: usize,
    pub failed: usize,
    pub timed_out: usize,
    /// Obligation kinds whose registry listing failed and were skipped.
    pub listing_failures: usize,
}

impl CycleReport {
    pub fn new(started_at: NaiveDateTime) -> Self {
        Self {
            started_at,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: &ObligationOutcome) {
        self.evaluated += 1;
        match outcome {
            ObligationOutcome::NotDue => self.not_due += 1,
            ObligationOutcome::Applied { .. } => self.applied += 1,
            ObligationOutcome::MissingBalance => self.missing_balance += 1,
            ObligationOutcome::Stale => self.stale += 1,
            ObligationOutcome::Failed(_) => self.failed += 1,
            ObligationOutcome::TimedOut => self.timed_out += 1,
        }
    }

    pub fn has_problems(&self) -> bool {
        self.missing_balance + self.failed + self.timed_out + self.listing_failures > 0
    }
}
