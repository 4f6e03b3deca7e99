use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::ObligationDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::obligations;
use outlays_core::errors::{Error, Result};
use outlays_core::obligations::{
    Obligation, ObligationChanges, ObligationKind, ObligationRepositoryTrait,
};
use outlays_core::LifecycleState;

pub struct ObligationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ObligationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ObligationRepository { pool, writer }
    }
}

fn into_domain(rows: Vec<ObligationDB>) -> Result<Vec<Obligation>> {
    rows.into_iter().map(Obligation::try_from).collect()
}

fn load_obligation(conn: &mut SqliteConnection, obligation_id: &str) -> Result<Obligation> {
    obligations::table
        .find(obligation_id)
        .select(ObligationDB::as_select())
        .first(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Obligation {}", obligation_id)))
        .and_then(Obligation::try_from)
}

#[async_trait]
impl ObligationRepositoryTrait for ObligationRepository {
    fn get_by_id(&self, obligation_id: &str) -> Result<Obligation> {
        let mut conn = get_connection(&self.pool)?;
        load_obligation(&mut conn, obligation_id)
    }

    fn list_active(&self, kind: ObligationKind) -> Result<Vec<Obligation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = obligations::table
            .filter(obligations::kind.eq(kind.as_str()))
            .filter(obligations::status.eq(LifecycleState::Active.as_str()))
            .select(ObligationDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }

    fn list_active_for_owner(
        &self,
        owner_id: &str,
        kind: ObligationKind,
    ) -> Result<Vec<Obligation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = obligations::table
            .filter(obligations::owner_id.eq(owner_id))
            .filter(obligations::kind.eq(kind.as_str()))
            .filter(obligations::status.eq(LifecycleState::Active.as_str()))
            .order((obligations::created_at.asc(), obligations::id.asc()))
            .select(ObligationDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }

    async fn insert(&self, obligation: Obligation) -> Result<Obligation> {
        let obligation_db = ObligationDB::from(obligation);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Obligation> {
                let inserted = diesel::insert_into(obligations::table)
                    .values(&obligation_db)
                    .returning(ObligationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Obligation::try_from(inserted)
            })
            .await
    }

    async fn update(&self, obligation_id: &str, changes: ObligationChanges) -> Result<Obligation> {
        let obligation_id = obligation_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Obligation> {
                // last_applied_at is owned by the accrual ledger and is left alone here.
                let affected = diesel::update(obligations::table.find(&obligation_id))
                    .set((
                        obligations::name.eq(changes.name),
                        obligations::amount.eq(changes.amount.to_string()),
                        obligations::cadence_days.eq(changes.cadence_days),
                        obligations::status.eq(changes.status.as_str()),
                        obligations::updated_at.eq(changes.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Obligation {}", obligation_id)));
                }
                load_obligation(conn, &obligation_id)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use crate::test_support::{insert_user, ts};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (
        ObligationRepository,
        Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let repo = ObligationRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn obligation(id: &str, owner: &str, kind: ObligationKind) -> Obligation {
        Obligation {
            id: id.to_string(),
            owner_id: owner.to_string(),
            kind,
            name: format!("{} {}", kind, id),
            amount: dec!(100.25),
            cadence_days: 30,
            last_applied_at: ts(1),
            status: LifecycleState::Active,
            created_at: ts(1),
            updated_at: ts(1),
        }
    }

    #[tokio::test]
    async fn lists_active_obligations_by_kind() {
        let (repo, pool, _dir) = create_test_repository().await;
        insert_user(&pool, "u1");
        insert_user(&pool, "u2");

        repo.insert(obligation("i1", "u1", ObligationKind::Income))
            .await
            .unwrap();
        repo.insert(obligation("i2", "u2", ObligationKind::Income))
            .await
            .unwrap();
        repo.insert(obligation("e1", "u1", ObligationKind::Expense))
            .await
            .unwrap();
        repo.insert(Obligation {
            status: LifecycleState::Inactive,
            ..obligation("i3", "u1", ObligationKind::Income)
        })
        .await
        .unwrap();

        let mut incomes: Vec<String> = repo
            .list_active(ObligationKind::Income)
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        incomes.sort();
        assert_eq!(incomes, vec!["i1", "i2"]);

        let own = repo
            .list_active_for_owner("u1", ObligationKind::Expense)
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].amount, dec!(100.25));
    }

    #[tokio::test]
    async fn update_keeps_the_anchor() {
        let (repo, pool, _dir) = create_test_repository().await;
        insert_user(&pool, "u1");
        repo.insert(obligation("i1", "u1", ObligationKind::Income))
            .await
            .unwrap();

        let updated = repo
            .update(
                "i1",
                ObligationChanges {
                    name: "Raise".to_string(),
                    amount: dec!(150),
                    cadence_days: 14,
                    status: LifecycleState::Inactive,
                    updated_at: ts(10),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Raise");
        assert_eq!(updated.amount, dec!(150));
        assert_eq!(updated.cadence_days, 14);
        assert_eq!(updated.status, LifecycleState::Inactive);
        assert_eq!(updated.last_applied_at, ts(1));
        assert_eq!(updated.updated_at, ts(10));
    }

    #[tokio::test]
    async fn missing_obligation_is_not_found() {
        let (repo, _pool, _dir) = create_test_repository().await;
        assert!(matches!(repo.get_by_id("nope"), Err(Error::NotFound(_))));
        let err = repo
            .update(
                "nope",
                ObligationChanges {
                    name: "x".to_string(),
                    amount: dec!(1),
                    cadence_days: 1,
                    status: LifecycleState::Active,
                    updated_at: ts(2),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
