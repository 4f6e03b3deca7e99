//! Record domain models.
//!
//! Every record kind shares a name, an amount and a lifecycle state. The
//! kind-specific attributes live in [`RecordDetails`], tagged by `kind`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::lifecycle::LifecycleState;
use crate::utils::money::require_non_negative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    VariableIncome,
    VariableExpense,
    Saving,
    Debt,
    Goal,
    FixedInvestment,
    VariableInvestment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::VariableIncome,
        RecordKind::VariableExpense,
        RecordKind::Saving,
        RecordKind::Debt,
        RecordKind::Goal,
        RecordKind::FixedInvestment,
        RecordKind::VariableInvestment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::VariableIncome => "variable_income",
            RecordKind::VariableExpense => "variable_expense",
            RecordKind::Saving => "saving",
            RecordKind::Debt => "debt",
            RecordKind::Goal => "goal",
            RecordKind::FixedInvestment => "fixed_investment",
            RecordKind::VariableInvestment => "variable_investment",
        }
    }

    /// Plural path segment under which the kind is exposed.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::VariableIncome => "variable_incomes",
            RecordKind::VariableExpense => "variable_expenses",
            RecordKind::Saving => "savings",
            RecordKind::Debt => "debts",
            RecordKind::Goal => "goals",
            RecordKind::FixedInvestment => "fixed_investments",
            RecordKind::VariableInvestment => "variable_investments",
        }
    }

    pub fn from_collection(collection: &str) -> Option<RecordKind> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.collection() == collection)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::VariableIncome => "variable income",
            RecordKind::VariableExpense => "variable expense",
            RecordKind::Saving => "saving",
            RecordKind::Debt => "debt",
            RecordKind::Goal => "goal",
            RecordKind::FixedInvestment => "fixed investment",
            RecordKind::VariableInvestment => "variable investment",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("Unknown record kind '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    Compound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RecordDetails {
    VariableIncome {
        received_date: NaiveDate,
    },
    VariableExpense {
        paid_date: NaiveDate,
    },
    Saving,
    Debt {
        payment: Decimal,
        interest_rate: Decimal,
        interest_type: InterestType,
        interest_period_days: i32,
        interest_free_months: i32,
    },
    Goal {
        saved_amount: Decimal,
    },
    FixedInvestment {
        interest_rate: Decimal,
        interest_type: InterestType,
        interest_period_days: i32,
    },
    VariableInvestment {
        interest_rate: Decimal,
        interest_type: InterestType,
        interest_period_days: i32,
        start_date: NaiveDate,
        #[serde(default)]
        end_date: Option<NaiveDate>,
    },
}

impl RecordDetails {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordDetails::VariableIncome { .. } => RecordKind::VariableIncome,
            RecordDetails::VariableExpense { .. } => RecordKind::VariableExpense,
            RecordDetails::Saving => RecordKind::Saving,
            RecordDetails::Debt { .. } => RecordKind::Debt,
            RecordDetails::Goal { .. } => RecordKind::Goal,
            RecordDetails::FixedInvestment { .. } => RecordKind::FixedInvestment,
            RecordDetails::VariableInvestment { .. } => RecordKind::VariableInvestment,
        }
    }

    /// Checks value ranges and rounds money fields to the stored precision.
    pub fn normalized(self) -> Result<RecordDetails> {
        Ok(match self {
            RecordDetails::Debt {
                payment,
                interest_rate,
                interest_type,
                interest_period_days,
                interest_free_months,
            } => RecordDetails::Debt {
                payment: require_non_negative("Payment", payment)?,
                interest_rate: require_non_negative("Interest rate", interest_rate)?,
                interest_type,
                interest_period_days: non_negative_int("Interest period", interest_period_days)?,
                interest_free_months: non_negative_int(
                    "Interest-free months",
                    interest_free_months,
                )?,
            },
            RecordDetails::Goal { saved_amount } => RecordDetails::Goal {
                saved_amount: require_non_negative("Saved amount", saved_amount)?,
            },
            RecordDetails::FixedInvestment {
                interest_rate,
                interest_type,
                interest_period_days,
            } => RecordDetails::FixedInvestment {
                interest_rate: require_non_negative("Interest rate", interest_rate)?,
                interest_type,
                interest_period_days: non_negative_int("Interest period", interest_period_days)?,
            },
            RecordDetails::VariableInvestment {
                interest_rate,
                interest_type,
                interest_period_days,
                start_date,
                end_date,
            } => {
                if let Some(end) = end_date {
                    if end < start_date {
                        return Err(Error::invalid_input("End date cannot precede start date"));
                    }
                }
                RecordDetails::VariableInvestment {
                    interest_rate: require_non_negative("Interest rate", interest_rate)?,
                    interest_type,
                    interest_period_days: non_negative_int(
                        "Interest period",
                        interest_period_days,
                    )?,
                    start_date,
                    end_date,
                }
            }
            other => other,
        })
    }

    /// Ensures the payload describes the collection it was submitted to.
    pub fn expect_kind(&self, kind: RecordKind) -> Result<()> {
        if self.kind() != kind {
            return Err(Error::invalid_input(format!(
                "Details of kind '{}' cannot be stored as '{}'",
                self.kind(),
                kind
            )));
        }
        Ok(())
    }
}

fn non_negative_int(field: &str, value: i32) -> Result<i32> {
    if value < 0 {
        return Err(Error::invalid_input(format!("{} cannot be negative", field)));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub amount: Decimal,
    pub details: RecordDetails,
    pub status: LifecycleState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.details.kind()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub name: String,
    pub amount: Decimal,
    pub details: RecordDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub details: Option<RecordDetails>,
    pub status: Option<LifecycleState>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordChanges {
    pub name: String,
    pub amount: Decimal,
    pub details: RecordDetails,
    pub status: LifecycleState,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn collections_round_trip_to_kinds() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_collection(kind.collection()), Some(kind));
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
        assert_eq!(RecordKind::from_collection("fixed_incomes"), None);
    }

    #[test]
    fn details_use_kind_tag_and_camel_case_fields() {
        let json = r#"{"kind":"debt","payment":150,"interestRate":4.5,"interestType":"compound","interestPeriodDays":30,"interestFreeMonths":0}"#;
        let details: RecordDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details,
            RecordDetails::Debt {
                payment: dec!(150),
                interest_rate: dec!(4.5),
                interest_type: InterestType::Compound,
                interest_period_days: 30,
                interest_free_months: 0,
            }
        );

        let saving: RecordDetails = serde_json::from_str(r#"{"kind":"saving"}"#).unwrap();
        assert_eq!(saving.kind(), RecordKind::Saving);
    }

    #[test]
    fn variable_investment_end_date_is_optional_and_ordered() {
        let open: RecordDetails = serde_json::from_str(
            r#"{"kind":"variable_investment","interestRate":3,"interestType":"simple","interestPeriodDays":365,"startDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert!(open.normalized().is_ok());

        let reversed = RecordDetails::VariableInvestment {
            interest_rate: dec!(3),
            interest_type: InterestType::Simple,
            interest_period_days: 365,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        assert!(reversed.normalized().is_err());
    }

    #[test]
    fn normalization_rejects_negative_terms() {
        let debt = RecordDetails::Debt {
            payment: dec!(-1),
            interest_rate: dec!(1),
            interest_type: InterestType::Simple,
            interest_period_days: 30,
            interest_free_months: 0,
        };
        assert!(debt.normalized().is_err());

        let goal = RecordDetails::Goal {
            saved_amount: dec!(10.555),
        };
        assert_eq!(
            goal.normalized().unwrap(),
            RecordDetails::Goal {
                saved_amount: dec!(10.56)
            }
        );
    }

    #[test]
    fn expect_kind_flags_mismatches() {
        let saving = RecordDetails::Saving;
        assert!(saving.expect_kind(RecordKind::Saving).is_ok());
        assert!(saving.expect_kind(RecordKind::Goal).is_err());
    }
}
