use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use uuid::Uuid;

use super::users_model::{
    normalize_email, validate_password, NewUser, RegisterUser, Role, User, UserUpdate,
};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::constants::{DEFAULT_USER_PAGE_SIZE, MAX_USER_PAGE_SIZE};
use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::movements::{record_movement, MovementRepositoryTrait, NewMovement};
use crate::utils::time_utils::now_utc;

/// Service for registration, authentication and user administration.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    movements: Arc<dyn MovementRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        movements: Arc<dyn MovementRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        Self {
            repository,
            movements,
            hasher,
        }
    }

    fn ensure_email_available(&self, email: &str, except_user_id: Option<&str>) -> Result<()> {
        if let Some(existing) = self.repository.find_by_email(email)? {
            if Some(existing.id.as_str()) != except_user_id {
                return Err(Error::ConstraintViolation(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }
        Ok(())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let email = normalize_email(&new_user.email);
        self.ensure_email_available(&email, None)?;

        let now = now_utc();
        let user = User {
            id: Uuid::now_v7().to_string(),
            first_name: new_user.first_name.trim().to_string(),
            last_name: new_user.last_name.trim().to_string(),
            email,
            password_hash: self.hasher.hash_password(&new_user.password)?,
            role: new_user.role,
            status: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert(user).await?;
        info!("Created {} account {}", created.role, created.id);
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(&created.id, "Created account", now),
        )
        .await;
        Ok(created)
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, registration: RegisterUser) -> Result<User> {
        self.insert_user(registration.into()).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.insert_user(new_user).await
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        let invalid = || Error::Unauthorized("Invalid email or password".to_string());

        let user = self.repository.find_by_email(&email)?.ok_or_else(invalid)?;
        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!("Password mismatch for user {}", user.id);
            return Err(invalid());
        }
        if !user.is_active() {
            return Err(Error::Forbidden("User is inactive".to_string()));
        }
        Ok(user)
    }

    async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self.repository.get_by_id(user_id)?;
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(Error::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }
        validate_password(new_password)?;

        let now = now_utc();
        let password_hash = self.hasher.hash_password(new_password)?;
        self.repository
            .update_password_hash(user_id, password_hash, now)
            .await?;
        record_movement(
            self.movements.as_ref(),
            NewMovement::new(user_id, "Changed password", now),
        )
        .await;
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn list_users(&self, skip: Option<i64>, limit: Option<i64>) -> Result<Vec<User>> {
        let offset = skip.unwrap_or(0).max(0);
        let limit = limit
            .unwrap_or(DEFAULT_USER_PAGE_SIZE)
            .clamp(1, MAX_USER_PAGE_SIZE);
        self.repository.list(offset, limit)
    }

    async fn update_user(&self, user_id: &str, changes: UserUpdate) -> Result<User> {
        changes.validate()?;
        let mut user = self.repository.get_by_id(user_id)?;

        if let Some(email) = &changes.email {
            let email = normalize_email(email);
            self.ensure_email_available(&email, Some(user_id))?;
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        user.updated_at = now_utc();
        self.repository.update(user).await
    }

    async fn deactivate_user(&self, acting_user_id: &str, user_id: &str) -> Result<User> {
        if acting_user_id == user_id {
            return Err(Error::Forbidden(
                "Administrators cannot delete their own account".to_string(),
            ));
        }
        self.repository.get_by_id(user_id)?;
        let user = self
            .repository
            .set_lifecycle_cascade(user_id, LifecycleState::Inactive, now_utc())
            .await?;
        info!("Deactivated user {} and all owned records", user_id);
        Ok(user)
    }

    async fn reactivate_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)?;
        let user = self
            .repository
            .set_lifecycle_cascade(user_id, LifecycleState::Active, now_utc())
            .await?;
        info!("Reactivated user {} and all owned records", user_id);
        Ok(user)
    }

    async fn ensure_admin(&self, email: &str, password: &str) -> Result<Option<User>> {
        if self.repository.count_active_admins()? > 0 {
            debug!("An active administrator already exists; skipping bootstrap");
            return Ok(None);
        }
        let admin = self
            .insert_user(NewUser {
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: Role::Admin,
            })
            .await?;
        Ok(Some(admin))
    }
}
