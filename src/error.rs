//! Error types for parameter loading, projection and output

use thiserror::Error;

/// Errors raised by the forecast library
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A growth-rate table has no entries, so no year can be indexed
    #[error("growth rate table '{table}' is empty")]
    EmptyGrowthTable { table: &'static str },

    /// Sales hiring cadence must be at least one month
    #[error("sales hiring interval must be >= 1, got {0}")]
    InvalidHiringInterval(u32),

    /// Conversion rate is a fraction of a cohort
    #[error("conversion rate must be within [0, 1], got {0}")]
    InvalidConversionRate(f64),

    /// NaN or infinite value in a numeric parameter
    #[error("parameter '{field}' is not a finite number")]
    NonFiniteParameter { field: &'static str },

    /// Start date was not in YYYY-MM-DD form
    #[error("invalid start date '{0}', expected YYYY-MM-DD")]
    InvalidStartDate(String),

    /// Calendar arithmetic left chrono's supported range
    #[error("calendar overflow adding {month} months to the start date")]
    DateOverflow { month: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
