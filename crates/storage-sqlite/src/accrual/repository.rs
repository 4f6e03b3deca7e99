//! Transactional ledger behind the accrual engine.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use crate::balances::find_active_balance;
use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::movements::insert_movement;
use crate::schema::{balances, obligations};
use crate::utils::parse_decimal;
use outlays_core::accrual::{AccrualApplyResult, AccrualLedgerTrait, AccrualRequest};
use outlays_core::errors::Result;
use outlays_core::movements::NewMovement;
use outlays_core::LifecycleState;

/// Applies accruals through the single writer.
///
/// Each request becomes one immediate transaction covering the obligation's
/// anchor, the balance amount and the audit movement. Either all three land
/// or none do.
pub struct AccrualRepository {
    writer: WriteHandle,
}

impl AccrualRepository {
    pub fn new(writer: WriteHandle) -> Self {
        AccrualRepository { writer }
    }
}

fn apply_in_transaction(
    conn: &mut SqliteConnection,
    request: &AccrualRequest,
) -> Result<AccrualApplyResult> {
    if request.applied_at < request.expected_last_applied_at {
        return Ok(AccrualApplyResult::Stale);
    }

    let still_current = obligations::table
        .filter(obligations::id.eq(&request.obligation_id))
        .filter(obligations::status.eq(LifecycleState::Active.as_str()))
        .filter(obligations::last_applied_at.eq(request.expected_last_applied_at))
        .count()
        .get_result::<i64>(conn)
        .map_err(StorageError::from)?
        > 0;
    if !still_current {
        return Ok(AccrualApplyResult::Stale);
    }

    let Some(balance) = find_active_balance(conn, &request.owner_id)? else {
        return Ok(AccrualApplyResult::MissingBalance);
    };

    let advanced = diesel::update(
        obligations::table
            .filter(obligations::id.eq(&request.obligation_id))
            .filter(obligations::status.eq(LifecycleState::Active.as_str()))
            .filter(obligations::last_applied_at.eq(request.expected_last_applied_at)),
    )
    .set((
        obligations::last_applied_at.eq(request.applied_at),
        obligations::updated_at.eq(request.applied_at),
    ))
    .execute(conn)
    .map_err(StorageError::from)?;
    if advanced == 0 {
        return Ok(AccrualApplyResult::Stale);
    }

    let new_amount = parse_decimal(&balance.amount, "balances.amount")? + request.delta;
    diesel::update(balances::table.find(&balance.id))
        .set((
            balances::amount.eq(new_amount.to_string()),
            balances::updated_at.eq(request.applied_at),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;

    insert_movement(
        conn,
        NewMovement::new(
            &request.owner_id,
            request.movement_description(),
            request.applied_at,
        ),
    )?;

    debug!(
        "Balance {} moved by {} to {} for obligation {}",
        balance.id, request.delta, new_amount, request.obligation_id
    );

    Ok(AccrualApplyResult::Applied {
        balance_id: balance.id,
        new_amount,
    })
}

#[async_trait]
impl AccrualLedgerTrait for AccrualRepository {
    async fn apply_accrual(&self, request: AccrualRequest) -> Result<AccrualApplyResult> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| apply_in_transaction(conn, &request))
            .await
    }
}
