use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::obligations::ObligationKind;
use crate::records::RecordKind;

/// A table of amounts that can be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTarget {
    Obligation(ObligationKind),
    Record(RecordKind),
}

impl AnalysisTarget {
    pub fn from_table(table: &str) -> Result<Self> {
        match table {
            "fixed_incomes" => Ok(AnalysisTarget::Obligation(ObligationKind::Income)),
            "fixed_expenses" => Ok(AnalysisTarget::Obligation(ObligationKind::Expense)),
            other => RecordKind::from_collection(other)
                .map(AnalysisTarget::Record)
                .ok_or_else(|| Error::invalid_input(format!("Invalid table name '{}'", other))),
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            AnalysisTarget::Obligation(ObligationKind::Income) => "fixed_incomes",
            AnalysisTarget::Obligation(ObligationKind::Expense) => "fixed_expenses",
            AnalysisTarget::Record(kind) => kind.collection(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub table: String,
    pub slope: f64,
    pub intercept: f64,
    pub sample_size: usize,
    pub trend_equation: String,
}
