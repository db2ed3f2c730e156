//! Financial Forecast - 72-month business-model projections
//!
//! This library provides:
//! - Month-by-month projection of clients, developers, affiliates and staff
//! - Cohort-based trial conversion and subscription revenue
//! - Itemized expenses and EBITDA per month
//! - Calendar-year aggregation and report views
//! - Parallel multi-scenario runs and CSV export

pub mod error;
pub mod output;
pub mod params;
pub mod projection;
pub mod summary;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use params::{ForecastParameters, GrowthRates, ParameterOverrides};
pub use projection::{forecast, run, ForecastResult, MonthlyRecord, ProjectionEngine, HORIZON_MONTHS};
pub use summary::{YearlyAggregator, YearlyRecord};
