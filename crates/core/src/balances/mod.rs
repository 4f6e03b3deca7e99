//! Balances module - the per-user cash balance that accruals land on.

mod balances_model;
mod balances_service;
mod balances_traits;


pub use balances_model::{Balance, BalanceChanges, BalanceUpdate, NewBalance};
pub use balances_service::BalanceService;
pub use balances_traits::{BalanceRepositoryTrait, BalanceServiceTrait};
