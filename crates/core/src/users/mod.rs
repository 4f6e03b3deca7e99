//! Users module - accounts, roles, and credential handling seams.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{normalize_email, NewUser, RegisterUser, Role, User, UserUpdate};
pub use users_service::UserService;
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
