use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::users_model::{NewUser, RegisterUser, User, UserUpdate};
use crate::errors::Result;
use crate::lifecycle::LifecycleState;

/// Hashing and verification of user passwords.
///
/// Implemented by the server with its password-hashing library of choice.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>>;
    fn count_active_admins(&self) -> Result<i64>;
    async fn insert(&self, user: User) -> Result<User>;
    /// Writes profile fields, role, status and `updated_at`. Never touches owned records.
    async fn update(&self, user: User) -> Result<User>;
    async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: String,
        updated_at: NaiveDateTime,
    ) -> Result<()>;
    /// Flips the user and every record they own to `state` in one transaction.
    async fn set_lifecycle_cascade(
        &self,
        user_id: &str,
        state: LifecycleState,
        updated_at: NaiveDateTime,
    ) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, registration: RegisterUser) -> Result<User>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    /// Resolves credentials to an active user.
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;
    async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn list_users(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Vec<User>>;
    async fn update_user(&self, user_id: &str, changes: UserUpdate) -> Result<User>;
    async fn deactivate_user(&self, acting_user_id: &str, user_id: &str) -> Result<User>;
    async fn reactivate_user(&self, user_id: &str) -> Result<User>;
    /// Creates an admin account when none is active. Returns the created user, if any.
    async fn ensure_admin(&self, email: &str, password: &str) -> Result<Option<User>>;
}
