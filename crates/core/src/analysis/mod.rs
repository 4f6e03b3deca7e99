//! Analysis module - linear trends over a user's amounts.

mod analysis_model;
mod analysis_service;
mod trend;

pub use analysis_model::{AnalysisTarget, TrendAnalysis};
pub use analysis_service::{AnalysisService, AnalysisServiceTrait};
pub use trend::{fit_linear_trend, TrendLine};
