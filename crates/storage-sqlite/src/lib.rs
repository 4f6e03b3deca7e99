//! SQLite storage implementation for EasyOutlays.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `outlays-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for users, obligations, balances, records and movements
//! - The transactional accrual ledger used by the accrual engine
//!
//! ```text
//!        core (domain, accrual engine)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accrual;
pub mod balances;
pub mod movements;
pub mod obligations;
pub mod records;
pub mod users;

mod utils;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accrual::AccrualRepository;
pub use balances::BalanceRepository;
pub use movements::MovementRepository;
pub use obligations::ObligationRepository;
pub use records::RecordRepository;
pub use users::UserRepository;

// Re-export from outlays-core for convenience
pub use outlays_core::errors::{DatabaseError, Error, Result};
