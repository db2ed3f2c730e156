//! Business-model parameters driving a forecast run
//!
//! A `ForecastParameters` value is immutable for the duration of one run.
//! Every field has a reference default, so partial JSON documents load into
//! a complete parameter set.

pub mod loader;
mod overrides;

pub use loader::{load_overrides, load_parameters, load_parameters_from_reader, parse_start_date};
pub use overrides::ParameterOverrides;

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Reference Parameter Values
// ============================================================================

/// Simulation month 0 of the reference scenario (2025-04-01)
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2025, 4, 1);

pub const DEFAULT_INITIAL_CLIENTS: u64 = 100;
pub const DEFAULT_INITIAL_DEVELOPERS: u64 = 50;
pub const DEFAULT_INITIAL_AFFILIATES: u64 = 20;

/// Per-year growth rates, index 0 is the first simulated year
pub const DEFAULT_CLIENT_GROWTH_RATES: [f64; 5] = [0.10, 0.12, 0.15, 0.12, 0.10];
pub const DEFAULT_DEVELOPER_GROWTH_RATES: [f64; 5] = [0.05, 0.07, 0.10, 0.08, 0.06];
pub const DEFAULT_AFFILIATE_GROWTH_RATES: [f64; 5] = [0.08, 0.10, 0.12, 0.10, 0.08];

/// Monthly subscription price ($)
pub const DEFAULT_SUBSCRIPTION_PRICE: f64 = 25.0;
/// Monthly commission paid per affiliate ($)
pub const DEFAULT_AFFILIATE_COMMISSION: f64 = 5.0;
pub const DEFAULT_FREE_MONTHS: u32 = 1;
pub const DEFAULT_CONVERSION_RATE: f64 = 0.75;

pub const DEFAULT_CTO_START_MONTH: u32 = 6;
pub const DEFAULT_CEO_START_MONTH: u32 = 6;
pub const DEFAULT_SALES_START_MONTH: u32 = 3;
pub const DEFAULT_SALES_HIRING_INTERVAL: u32 = 3;
pub const DEFAULT_MAX_SALES_STAFF: u32 = 10;
pub const DEFAULT_JR_DEV_START_MONTH: u32 = 6;
pub const DEFAULT_ADMIN_START_MONTH: u32 = 6;

/// $150K/year
pub const DEFAULT_CTO_SALARY: f64 = 12_500.0;
/// $150K/year
pub const DEFAULT_CEO_SALARY: f64 = 12_500.0;
/// $120K/year
pub const DEFAULT_SALES_BASE_SALARY: f64 = 10_000.0;
pub const DEFAULT_SALES_COMMISSION: f64 = 0.05;
/// $100K/year
pub const DEFAULT_JR_DEV_SALARY: f64 = 8_333.0;
/// $100K/year
pub const DEFAULT_ADMIN_SALARY: f64 = 8_333.0;

pub const DEFAULT_MARKETING_PERCENTAGE: f64 = 0.15;
pub const DEFAULT_INFRASTRUCTURE_COST_PER_USER: f64 = 1.5;
pub const DEFAULT_OTHER_EXPENSES_PERCENTAGE: f64 = 0.10;

/// Per-annum growth rates indexed by simulation year
///
/// Lookups past the end of the table reuse the last entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GrowthRates(Vec<f64>);

impl GrowthRates {
    pub fn new(rates: Vec<f64>) -> Self {
        Self(rates)
    }

    /// Simulation year used for `month`, clamped to the last table entry
    pub fn year_index(&self, month: u32) -> usize {
        let year = (month / 12) as usize;
        year.min(self.0.len().saturating_sub(1))
    }

    /// Growth rate applicable in simulation `month` (0-based)
    ///
    /// An empty table yields 0.0; `ForecastParameters::validate` rejects
    /// empty tables before any run starts.
    pub fn rate_for_month(&self, month: u32) -> f64 {
        self.0.get(self.year_index(month)).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for GrowthRates {
    fn from(rates: Vec<f64>) -> Self {
        Self(rates)
    }
}

impl From<&[f64]> for GrowthRates {
    fn from(rates: &[f64]) -> Self {
        Self(rates.to_vec())
    }
}

/// Complete parameter set for one forecast scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParameters {
    /// Calendar date of simulation month 0
    pub start_date: NaiveDate,

    // Initial stocks
    pub initial_clients: u64,
    pub initial_developers: u64,
    pub initial_affiliates: u64,

    // Growth-rate tables (per simulation year)
    pub client_growth_rates: GrowthRates,
    pub developer_growth_rates: GrowthRates,
    pub affiliate_growth_rates: GrowthRates,

    // Pricing
    pub subscription_price: f64,
    pub affiliate_commission: f64,
    /// Trial length before a cohort's conversion is evaluated
    pub free_months: u32,
    /// Fraction of a cohort converting when its trial ends (0.0 to 1.0)
    pub conversion_rate: f64,

    // Hiring triggers, 0-based month indices
    pub cto_start_month: u32,
    pub ceo_start_month: u32,
    pub jr_dev_start_month: u32,
    pub admin_start_month: u32,
    pub sales_start_month: u32,
    /// Months between consecutive sales hires (>= 1)
    pub sales_hiring_interval: u32,
    pub max_sales_staff: u32,

    // Monthly compensation
    pub cto_salary: f64,
    pub ceo_salary: f64,
    pub sales_base_salary: f64,
    /// Fraction of sales-acquired subscription value paid as commission
    pub sales_commission: f64,
    pub jr_dev_salary: f64,
    pub admin_salary: f64,

    // Cost ratios
    /// Fraction of revenue spent on marketing
    pub marketing_percentage: f64,
    /// Monthly cost per client or developer ($)
    pub infrastructure_cost_per_user: f64,
    /// Fraction of revenue spent on other expenses
    pub other_expenses_percentage: f64,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_START_DATE;
        Self {
            start_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            initial_clients: DEFAULT_INITIAL_CLIENTS,
            initial_developers: DEFAULT_INITIAL_DEVELOPERS,
            initial_affiliates: DEFAULT_INITIAL_AFFILIATES,
            client_growth_rates: GrowthRates::from(&DEFAULT_CLIENT_GROWTH_RATES[..]),
            developer_growth_rates: GrowthRates::from(&DEFAULT_DEVELOPER_GROWTH_RATES[..]),
            affiliate_growth_rates: GrowthRates::from(&DEFAULT_AFFILIATE_GROWTH_RATES[..]),
            subscription_price: DEFAULT_SUBSCRIPTION_PRICE,
            affiliate_commission: DEFAULT_AFFILIATE_COMMISSION,
            free_months: DEFAULT_FREE_MONTHS,
            conversion_rate: DEFAULT_CONVERSION_RATE,
            cto_start_month: DEFAULT_CTO_START_MONTH,
            ceo_start_month: DEFAULT_CEO_START_MONTH,
            jr_dev_start_month: DEFAULT_JR_DEV_START_MONTH,
            admin_start_month: DEFAULT_ADMIN_START_MONTH,
            sales_start_month: DEFAULT_SALES_START_MONTH,
            sales_hiring_interval: DEFAULT_SALES_HIRING_INTERVAL,
            max_sales_staff: DEFAULT_MAX_SALES_STAFF,
            cto_salary: DEFAULT_CTO_SALARY,
            ceo_salary: DEFAULT_CEO_SALARY,
            sales_base_salary: DEFAULT_SALES_BASE_SALARY,
            sales_commission: DEFAULT_SALES_COMMISSION,
            jr_dev_salary: DEFAULT_JR_DEV_SALARY,
            admin_salary: DEFAULT_ADMIN_SALARY,
            marketing_percentage: DEFAULT_MARKETING_PERCENTAGE,
            infrastructure_cost_per_user: DEFAULT_INFRASTRUCTURE_COST_PER_USER,
            other_expenses_percentage: DEFAULT_OTHER_EXPENSES_PERCENTAGE,
        }
    }
}

impl ForecastParameters {
    /// Fresh copy of the reference scenario parameters
    pub fn reference() -> Self {
        Self::default()
    }

    /// Check the preconditions the projection arithmetic relies on
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("client_growth_rates", &self.client_growth_rates),
            ("developer_growth_rates", &self.developer_growth_rates),
            ("affiliate_growth_rates", &self.affiliate_growth_rates),
        ];
        for (table, rates) in tables {
            if rates.is_empty() {
                return Err(ForecastError::EmptyGrowthTable { table });
            }
            if rates.as_slice().iter().any(|r| !r.is_finite()) {
                return Err(ForecastError::NonFiniteParameter { field: table });
            }
        }

        if self.sales_hiring_interval == 0 {
            return Err(ForecastError::InvalidHiringInterval(self.sales_hiring_interval));
        }

        let amounts = [
            ("subscription_price", self.subscription_price),
            ("affiliate_commission", self.affiliate_commission),
            ("conversion_rate", self.conversion_rate),
            ("cto_salary", self.cto_salary),
            ("ceo_salary", self.ceo_salary),
            ("sales_base_salary", self.sales_base_salary),
            ("sales_commission", self.sales_commission),
            ("jr_dev_salary", self.jr_dev_salary),
            ("admin_salary", self.admin_salary),
            ("marketing_percentage", self.marketing_percentage),
            ("infrastructure_cost_per_user", self.infrastructure_cost_per_user),
            ("other_expenses_percentage", self.other_expenses_percentage),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ForecastError::NonFiniteParameter { field });
            }
        }

        if !(0.0..=1.0).contains(&self.conversion_rate) {
            return Err(ForecastError::InvalidConversionRate(self.conversion_rate));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let params = ForecastParameters::reference();

        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(params.initial_clients, 100);
        assert_eq!(params.initial_developers, 50);
        assert_eq!(params.initial_affiliates, 20);
        assert_eq!(params.free_months, 1);
        assert_eq!(params.sales_hiring_interval, 3);
        assert_eq!(params.max_sales_staff, 10);
        assert_eq!(params.client_growth_rates.as_slice(), &[0.10, 0.12, 0.15, 0.12, 0.10]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_reference_is_fresh_per_call() {
        let mut first = ForecastParameters::reference();
        first.client_growth_rates = GrowthRates::new(vec![0.5]);
        first.initial_clients = 1;

        let second = ForecastParameters::reference();
        assert_eq!(second.initial_clients, 100);
        assert_eq!(second.client_growth_rates.len(), 5);
    }

    #[test]
    fn test_growth_rate_clamping() {
        let rates = GrowthRates::new(vec![0.10, 0.12, 0.15]);

        assert_eq!(rates.rate_for_month(0), 0.10);
        assert_eq!(rates.rate_for_month(11), 0.10);
        assert_eq!(rates.rate_for_month(12), 0.12);
        assert_eq!(rates.rate_for_month(35), 0.15);
        // Past the table: last entry reused
        assert_eq!(rates.year_index(36), 2);
        assert_eq!(rates.rate_for_month(71), 0.15);
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let params = ForecastParameters {
            developer_growth_rates: GrowthRates::new(vec![]),
            ..Default::default()
        };
        match params.validate() {
            Err(ForecastError::EmptyGrowthTable { table }) => {
                assert_eq!(table, "developer_growth_rates")
            }
            other => panic!("expected empty table error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let params = ForecastParameters {
            sales_hiring_interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ForecastError::InvalidHiringInterval(0))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let params = ForecastParameters {
            conversion_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ForecastError::InvalidConversionRate(_))
        ));

        let params = ForecastParameters {
            cto_salary: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ForecastError::NonFiniteParameter { field: "cto_salary" })
        ));
    }
}
