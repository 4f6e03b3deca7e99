//! Obligations module - recurring fixed incomes and fixed expenses.

mod obligations_model;
mod obligations_service;
mod obligations_traits;

#[cfg(test)]
mod obligations_service_tests;

pub use obligations_model::{
    NewObligation, Obligation, ObligationChanges, ObligationKind, ObligationUpdate,
};
pub use obligations_service::ObligationService;
pub use obligations_traits::{ObligationRepositoryTrait, ObligationServiceTrait};
