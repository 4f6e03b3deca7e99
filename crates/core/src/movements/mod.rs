//! Movements module - the per-user audit log.

mod movements_model;
mod movements_traits;

pub use movements_model::{Movement, NewMovement};
pub use movements_traits::{record_movement, MovementRepositoryTrait};
