use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::analysis_model::{AnalysisTarget, TrendAnalysis};
use super::trend::fit_linear_trend;
use crate::constants::MIN_TREND_SAMPLE_SIZE;
use crate::errors::{Error, Result};
use crate::obligations::ObligationRepositoryTrait;
use crate::records::RecordRepositoryTrait;

pub trait AnalysisServiceTrait: Send + Sync {
    /// Trend of the owner's active amounts in `table`, oldest first.
    fn analyze(&self, owner_id: &str, table: &str) -> Result<TrendAnalysis>;
}

pub struct AnalysisService {
    obligations: Arc<dyn ObligationRepositoryTrait>,
    records: Arc<dyn RecordRepositoryTrait>,
}

impl AnalysisService {
    pub fn new(
        obligations: Arc<dyn ObligationRepositoryTrait>,
        records: Arc<dyn RecordRepositoryTrait>,
    ) -> Self {
        Self {
            obligations,
            records,
        }
    }

    fn amounts(&self, owner_id: &str, target: AnalysisTarget) -> Result<Vec<Decimal>> {
        let mut samples: Vec<(NaiveDateTime, Decimal)> = match target {
            AnalysisTarget::Obligation(kind) => self
                .obligations
                .list_active_for_owner(owner_id, kind)?
                .into_iter()
                .map(|o| (o.created_at, o.amount))
                .collect(),
            AnalysisTarget::Record(kind) => self
                .records
                .list_active_for_owner(owner_id, kind)?
                .into_iter()
                .map(|r| (r.created_at, r.amount))
                .collect(),
        };
        samples.sort_by_key(|(created_at, _)| *created_at);
        Ok(samples.into_iter().map(|(_, amount)| amount).collect())
    }
}

impl AnalysisServiceTrait for AnalysisService {
    fn analyze(&self, owner_id: &str, table: &str) -> Result<TrendAnalysis> {
        let target = AnalysisTarget::from_table(table)?;
        let amounts = self.amounts(owner_id, target)?;
        if amounts.len() < MIN_TREND_SAMPLE_SIZE {
            return Err(Error::InsufficientData(format!(
                "at least {} active records are required, found {}",
                MIN_TREND_SAMPLE_SIZE,
                amounts.len()
            )));
        }
        let line = fit_linear_trend(&amounts).ok_or_else(|| {
            Error::Unexpected("amounts could not be converted for regression".to_string())
        })?;
        Ok(TrendAnalysis {
            table: target.table().to_string(),
            slope: line.slope,
            intercept: line.intercept,
            sample_size: amounts.len(),
            trend_equation: line.equation(),
        })
    }
}
