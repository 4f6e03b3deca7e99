//! Records module - one-off incomes and expenses, savings, debts, goals and investments.

mod records_model;
mod records_service;
mod records_traits;

#[cfg(test)]
mod records_service_tests;

pub use records_model::{
    InterestType, NewRecord, Record, RecordChanges, RecordDetails, RecordKind, RecordUpdate,
};
pub use records_service::RecordService;
pub use records_traits::{RecordRepositoryTrait, RecordServiceTrait};
