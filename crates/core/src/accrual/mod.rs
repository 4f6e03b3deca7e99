//! Accrual module - turns elapsed time into balance deltas for recurring obligations.
//!
//! [`AccrualEngine::run_cycle`] walks every active obligation once. A due
//! obligation is handed to an [`AccrualLedgerTrait`] implementation, which
//! must apply the balance delta and advance the obligation's anchor in a
//! single transaction.

mod accrual_engine;
mod accrual_model;
mod accrual_traits;
mod cadence;
mod clock;


pub use accrual_engine::{AccrualEngine, DEFAULT_APPLY_TIMEOUT};
pub use accrual_model::{AccrualApplyResult, AccrualRequest, CycleReport, ObligationOutcome};
pub use accrual_traits::AccrualLedgerTrait;
pub use cadence::{is_due, next_due_at};
pub use clock::{Clock, FixedClock, SystemClock};
