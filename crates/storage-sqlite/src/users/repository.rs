use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{balances, obligations, records, users};
use outlays_core::errors::{Error, Result};
use outlays_core::users::{Role, User, UserRepositoryTrait};
use outlays_core::LifecycleState;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
        .and_then(User::try_from)
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(User::try_from)
            .transpose()
    }

    fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .order((users::created_at.asc(), users::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(UserDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn count_active_admins(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::role.eq(Role::Admin.as_str()))
            .filter(users::status.eq(LifecycleState::Active.as_str()))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn insert(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(user);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                User::try_from(inserted)
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        let user_id = user.id.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let affected = diesel::update(users::table.find(&user_id))
                    .set((
                        users::first_name.eq(&user.first_name),
                        users::last_name.eq(&user.last_name),
                        users::email.eq(&user.email),
                        users::role.eq(user.role.as_str()),
                        users::status.eq(user.status.as_str()),
                        users::updated_at.eq(user.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("User {}", user_id)));
                }
                load_user(conn, &user_id)
            })
            .await
    }

    async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: String,
        updated_at: NaiveDateTime,
    ) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(users::table.find(&user_id))
                    .set((
                        users::password_hash.eq(password_hash),
                        users::updated_at.eq(updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("User {}", user_id)));
                }
                Ok(())
            })
            .await
    }

    async fn set_lifecycle_cascade(
        &self,
        user_id: &str,
        state: LifecycleState,
        updated_at: NaiveDateTime,
    ) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let status = state.as_str();
                let affected = diesel::update(users::table.find(&user_id))
                    .set((users::status.eq(status), users::updated_at.eq(updated_at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("User {}", user_id)));
                }

                diesel::update(obligations::table.filter(obligations::owner_id.eq(&user_id)))
                    .set((
                        obligations::status.eq(status),
                        obligations::updated_at.eq(updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(balances::table.filter(balances::owner_id.eq(&user_id)))
                    .set((balances::status.eq(status), balances::updated_at.eq(updated_at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(records::table.filter(records::owner_id.eq(&user_id)))
                    .set((records::status.eq(status), records::updated_at.eq(updated_at)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                // Movements are an append-only log and keep no lifecycle state.

                load_user(conn, &user_id)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::BalanceRepository;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use crate::obligations::ObligationRepository;
    use chrono::NaiveDate;
    use outlays_core::balances::{Balance, BalanceRepositoryTrait};
    use outlays_core::obligations::{Obligation, ObligationKind, ObligationRepositoryTrait};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    type TestPool = Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>;

    async fn create_test_repository() -> (UserRepository, TestPool, WriteHandle, tempfile::TempDir)
    {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        let repo = UserRepository::new(Arc::clone(&pool), writer.clone());
        (repo, pool, writer, temp_dir)
    }

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn user(id: &str, email: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            status: LifecycleState::Active,
            created_at: ts(1),
            updated_at: ts(1),
        }
    }

    #[tokio::test]
    async fn insert_and_lookup_by_email() {
        let (repo, _pool, _writer, _dir) = create_test_repository().await;
        repo.insert(user("u1", "grace@example.com", Role::User))
            .await
            .unwrap();

        let found = repo.find_by_email("grace@example.com").unwrap().unwrap();
        assert_eq!(found.id, "u1");
        assert_eq!(found.password_hash, "hash");
        assert!(repo.find_by_email("nobody@example.com").unwrap().is_none());
        assert!(matches!(repo.get_by_id("missing"), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let (repo, _pool, _writer, _dir) = create_test_repository().await;
        repo.insert(user("u1", "grace@example.com", Role::User))
            .await
            .unwrap();
        let err = repo
            .insert(user("u2", "grace@example.com", Role::User))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(outlays_core::errors::DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn counts_only_active_admins() {
        let (repo, _pool, _writer, _dir) = create_test_repository().await;
        repo.insert(user("a1", "a1@example.com", Role::Admin))
            .await
            .unwrap();
        repo.insert(user("u1", "u1@example.com", Role::User))
            .await
            .unwrap();
        assert_eq!(repo.count_active_admins().unwrap(), 1);

        repo.set_lifecycle_cascade("a1", LifecycleState::Inactive, ts(2))
            .await
            .unwrap();
        assert_eq!(repo.count_active_admins().unwrap(), 0);
    }

    #[tokio::test]
    async fn deactivation_cascades_to_owned_rows() {
        let (repo, pool, writer, _dir) = create_test_repository().await;
        repo.insert(user("u1", "u1@example.com", Role::User))
            .await
            .unwrap();

        let obligations = ObligationRepository::new(Arc::clone(&pool), writer.clone());
        let balances = BalanceRepository::new(Arc::clone(&pool), writer.clone());
        obligations
            .insert(Obligation {
                id: "o1".to_string(),
                owner_id: "u1".to_string(),
                kind: ObligationKind::Income,
                name: "Salary".to_string(),
                amount: dec!(100),
                cadence_days: 30,
                last_applied_at: ts(1),
                status: LifecycleState::Active,
                created_at: ts(1),
                updated_at: ts(1),
            })
            .await
            .unwrap();
        balances
            .insert(Balance {
                id: "b1".to_string(),
                owner_id: "u1".to_string(),
                amount: dec!(500),
                status: LifecycleState::Active,
                created_at: ts(1),
                updated_at: ts(1),
            })
            .await
            .unwrap();

        let deactivated = repo
            .set_lifecycle_cascade("u1", LifecycleState::Inactive, ts(5))
            .await
            .unwrap();
        assert_eq!(deactivated.status, LifecycleState::Inactive);
        assert!(obligations
            .list_active(ObligationKind::Income)
            .unwrap()
            .is_empty());
        assert!(balances.find_active_for_owner("u1").unwrap().is_none());

        repo.set_lifecycle_cascade("u1", LifecycleState::Active, ts(6))
            .await
            .unwrap();
        let restored = obligations.get_by_id("o1").unwrap();
        assert_eq!(restored.status, LifecycleState::Active);
        assert_eq!(restored.last_applied_at, ts(1));
        assert!(balances.find_active_for_owner("u1").unwrap().is_some());
    }

    #[tokio::test]
    async fn cascade_on_unknown_user_is_not_found() {
        let (repo, _pool, _writer, _dir) = create_test_repository().await;
        let err = repo
            .set_lifecycle_cascade("ghost", LifecycleState::Inactive, ts(2))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
