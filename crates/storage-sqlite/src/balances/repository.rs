use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{BalanceChangesDB, BalanceDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::balances;
use outlays_core::balances::{Balance, BalanceChanges, BalanceRepositoryTrait};
use outlays_core::errors::{Error, Result};
use outlays_core::LifecycleState;

pub struct BalanceRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BalanceRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BalanceRepository { pool, writer }
    }
}

/// The owner's active balance; with duplicates, the earliest created wins.
///
/// Shared with the accrual ledger so both paths agree on which row is "the" balance.
pub(crate) fn find_active_balance(
    conn: &mut SqliteConnection,
    owner_id: &str,
) -> Result<Option<BalanceDB>> {
    Ok(balances::table
        .filter(balances::owner_id.eq(owner_id))
        .filter(balances::status.eq(LifecycleState::Active.as_str()))
        .order((balances::created_at.asc(), balances::id.asc()))
        .select(BalanceDB::as_select())
        .first(conn)
        .optional()
        .map_err(StorageError::from)?)
}

#[async_trait]
impl BalanceRepositoryTrait for BalanceRepository {
    fn find_active_for_owner(&self, owner_id: &str) -> Result<Option<Balance>> {
        let mut conn = get_connection(&self.pool)?;
        find_active_balance(&mut conn, owner_id)?
            .map(Balance::try_from)
            .transpose()
    }

    fn find_latest_for_owner(&self, owner_id: &str) -> Result<Option<Balance>> {
        let mut conn = get_connection(&self.pool)?;
        balances::table
            .filter(balances::owner_id.eq(owner_id))
            .order((balances::updated_at.desc(), balances::id.desc()))
            .select(BalanceDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Balance::try_from)
            .transpose()
    }

    async fn insert(&self, balance: Balance) -> Result<Balance> {
        let balance_db = BalanceDB::from(balance);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Balance> {
                let inserted = diesel::insert_into(balances::table)
                    .values(&balance_db)
                    .returning(BalanceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Balance::try_from(inserted)
            })
            .await
    }

    async fn update(&self, balance_id: &str, changes: BalanceChanges) -> Result<Balance> {
        let balance_id = balance_id.to_string();
        let changes = BalanceChangesDB::from(changes);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Balance> {
                let updated = diesel::update(balances::table.find(&balance_id))
                    .set(&changes)
                    .returning(BalanceDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Balance {}", balance_id)))?;
                Balance::try_from(updated)
            })
            .await
    }
}
