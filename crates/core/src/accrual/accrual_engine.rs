use std::panic::AssertUnwindSafe;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::NaiveDateTime;
use futures::FutureExt;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use super::accrual_model::{AccrualRequest, CycleReport, ObligationOutcome};
use super::accrual_traits::AccrualLedgerTrait;
use super::cadence::is_due;
use super::clock::Clock;
use crate::obligations::{Obligation, ObligationKind, ObligationRepositoryTrait};

/// Upper bound on a single obligation's apply step.
pub const DEFAULT_APPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Applies due fixed incomes and expenses to their owners' balances.
///
/// Each obligation is applied at most once per cycle, even when several
/// cadence periods have elapsed; the remainder is picked up by later cycles.
/// Cycles within one engine never overlap.
pub struct AccrualEngine {
    obligations: Arc<dyn ObligationRepositoryTrait>,
    ledger: Arc<dyn AccrualLedgerTrait>,
    clock: Arc<dyn Clock>,
    apply_timeout: Duration,
    cycle_lock: Mutex<()>,
    last_report: RwLock<Option<CycleReport>>,
}

impl AccrualEngine {
    pub fn new(
        obligations: Arc<dyn ObligationRepositoryTrait>,
        ledger: Arc<dyn AccrualLedgerTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            obligations,
            ledger,
            clock,
            apply_timeout: DEFAULT_APPLY_TIMEOUT,
            cycle_lock: Mutex::new(()),
            last_report: RwLock::new(None),
        }
    }

    pub fn with_apply_timeout(mut self, apply_timeout: Duration) -> Self {
        self.apply_timeout = apply_timeout;
        self
    }

    /// Runs a cycle at the engine clock's current instant.
    pub async fn run_scheduled_cycle(&self) -> CycleReport {
        let now = self.clock.now();
        self.run_cycle(now).await
    }

    /// Evaluates every active obligation against `now`.
    ///
    /// Never fails: problems with individual obligations are logged and
    /// counted in the returned report.
    pub async fn run_cycle(&self, now: NaiveDateTime) -> CycleReport {
        let _guard = self.cycle_lock.lock().await;
        let mut report = CycleReport::new(now);
        debug!("Starting accrual cycle at {}", now);

        for kind in ObligationKind::ALL {
            let obligations = match self.obligations.list_active(kind) {
                Ok(obligations) => obligations,
                Err(e) => {
                    error!("Failed to list active {} obligations: {}", kind, e);
                    report.listing_failures += 1;
                    continue;
                }
            };

            for obligation in obligations {
                let outcome = self.process(&obligation, now).await;
                report.record(&outcome);
            }
        }

        report.finished_at = Some(self.clock.now().max(now));
        if report.has_problems() {
            warn!(
                "Accrual cycle finished with problems: {} evaluated, {} applied, {} missing balance, {} failed, {} timed out, {} listing failures",
                report.evaluated,
                report.applied,
                report.missing_balance,
                report.failed,
                report.timed_out,
                report.listing_failures
            );
        } else {
            info!(
                "Accrual cycle finished: {} evaluated, {} applied, {} not due, {} stale",
                report.evaluated, report.applied, report.not_due, report.stale
            );
        }

        if let Ok(mut last) = self.last_report.write() {
            *last = Some(report.clone());
        }
        report
    }

    /// Report of the most recently completed cycle.
    pub fn last_report(&self) -> Option<CycleReport> {
        self.last_report
            .read()
            .ok()
            .and_then(|report| report.clone())
    }

    async fn process(&self, obligation: &Obligation, now: NaiveDateTime) -> ObligationOutcome {
        if !obligation.is_active() {
            debug!("Skipping inactive obligation {}", obligation.id);
            return ObligationOutcome::NotDue;
        }
        if !is_due(obligation.last_applied_at, obligation.cadence_days, now) {
            return ObligationOutcome::NotDue;
        }

        let request = AccrualRequest::for_obligation(obligation, now);
        let apply = AssertUnwindSafe(self.ledger.apply_accrual(request)).catch_unwind();

        let outcome = match tokio::time::timeout(self.apply_timeout, apply).await {
            Ok(Ok(Ok(result))) => ObligationOutcome::from(result),
            Ok(Ok(Err(e))) => ObligationOutcome::Failed(e.to_string()),
            Ok(Err(_panic)) => ObligationOutcome::Failed("apply step panicked".to_string()),
            Err(_elapsed) => ObligationOutcome::TimedOut,
        };

        match &outcome {
            ObligationOutcome::Applied { new_amount } => info!(
                "Applied {} {} ({} {}) for user {}; balance is now {}",
                obligation.kind.label(),
                obligation.id,
                obligation.kind.signed(obligation.amount),
                obligation.name,
                obligation.owner_id,
                new_amount
            ),
            ObligationOutcome::MissingBalance => warn!(
                "User {} has no active balance; {} {} stays due",
                obligation.owner_id,
                obligation.kind.label(),
                obligation.id
            ),
            ObligationOutcome::Stale => debug!(
                "Obligation {} changed since it was read; skipped",
                obligation.id
            ),
            ObligationOutcome::Failed(reason) => error!(
                "Failed to apply {} {}: {}",
                obligation.kind.label(),
                obligation.id,
                reason
            ),
            ObligationOutcome::TimedOut => warn!(
                "Applying {} {} exceeded {:?}; moving on",
                obligation.kind.label(),
                obligation.id,
                self.apply_timeout
            ),
            ObligationOutcome::NotDue => {}
        }
        outcome
    }
}
