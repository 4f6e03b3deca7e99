//! Obligation domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::utils::money::require_positive;

/// Direction in which an obligation moves the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    Income,
    Expense,
}

impl ObligationKind {
    pub const ALL: [ObligationKind; 2] = [ObligationKind::Income, ObligationKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObligationKind::Income => "income",
            ObligationKind::Expense => "expense",
        }
    }

    /// Human label used in movement descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            ObligationKind::Income => "fixed income",
            ObligationKind::Expense => "fixed expense",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ObligationKind::Income => "Fixed income",
            ObligationKind::Expense => "Fixed expense",
        }
    }

    /// Balance delta for one application of `amount`.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            ObligationKind::Income => amount,
            ObligationKind::Expense => -amount,
        }
    }
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObligationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(ObligationKind::Income),
            "expense" => Ok(ObligationKind::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown obligation kind '{}'",
                other
            ))),
        }
    }
}

/// A recurring fixed income or fixed expense.
///
/// `last_applied_at` is the anchor for due checks. Only the accrual engine moves it,
/// and only forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub id: String,
    pub owner_id: String,
    pub kind: ObligationKind,
    pub name: String,
    pub amount: Decimal,
    pub cadence_days: i32,
    pub last_applied_at: NaiveDateTime,
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Obligation {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Input model for creating an obligation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObligation {
    pub name: String,
    pub amount: Decimal,
    pub cadence_days: i32,
}

impl NewObligation {
    /// Validates and returns the normalized amount.
    pub fn validate(&self) -> Result<Decimal> {
        validate_name(&self.name)?;
        validate_cadence(self.cadence_days)?;
        require_positive("Amount", self.amount)
    }
}

/// Partial update submitted by the owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObligationUpdate {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub cadence_days: Option<i32>,
    pub status: Option<LifecycleState>,
}

impl ObligationUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(cadence_days) = self.cadence_days {
            validate_cadence(cadence_days)?;
        }
        if let Some(amount) = self.amount {
            require_positive("Amount", amount)?;
        }
        Ok(())
    }
}

/// Columns a user edit may write. The anchor timestamp is not among them.
#[derive(Debug, Clone, PartialEq)]
pub struct ObligationChanges {
    pub name: String,
    pub amount: Decimal,
    pub cadence_days: i32,
    pub status: LifecycleState,
    pub updated_at: NaiveDateTime,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Name cannot be empty"));
    }
    Ok(())
}

fn validate_cadence(cadence_days: i32) -> Result<()> {
    if cadence_days <= 0 {
        return Err(Error::invalid_input(
            "Cadence must be a positive number of days",
        ));
    }
    Ok(())
}
