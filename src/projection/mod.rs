//! Projection engine for single and multi-scenario forecasts

mod batch;
mod engine;
mod records;
mod state;

pub use batch::{run_batch, ScenarioOutcome};
pub use engine::{
    affiliate_acquisition, base_acquisition, new_affiliates, new_developers, sales_acquisition,
    ProjectionEngine,
};
pub use records::{round_money, ForecastResult, MonthlyRecord};
pub use state::{ClientCohort, ProjectionState, StaffRoster};

use crate::error::Result;
use crate::params::ForecastParameters;
use crate::summary::YearlyAggregator;

/// Length of every projection (6 years)
pub const HORIZON_MONTHS: u32 = 72;

/// Project the monthly records for one parameter set
pub fn run(params: &ForecastParameters) -> Result<Vec<MonthlyRecord>> {
    ProjectionEngine::new(params.clone())?.run()
}

/// Project one parameter set and aggregate it by calendar year
pub fn forecast(params: &ForecastParameters) -> Result<ForecastResult> {
    let monthly = run(params)?;
    let yearly = YearlyAggregator::summarize(&monthly);
    Ok(ForecastResult { monthly, yearly })
}
