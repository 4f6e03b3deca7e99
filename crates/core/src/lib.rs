//! EasyOutlays Core - domain entities, services, and traits.
//!
//! This crate contains the business logic of the EasyOutlays backend,
//! most notably the recurring accrual engine in [`accrual`]. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod accrual;
pub mod analysis;
pub mod balances;
pub mod constants;
pub mod errors;
pub mod lifecycle;
pub mod movements;
pub mod obligations;
pub mod records;
pub mod users;
pub mod utils;

pub use lifecycle::LifecycleState;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
