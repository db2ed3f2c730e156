//! Output rows of a projection run

use crate::summary::YearlyRecord;
use serde::{Deserialize, Serialize};

/// Round a monetary amount to cents, ties to even
///
/// A tie is decided on the exact value of `value * 100`, not on the rounded
/// product, so 0.125 goes to 0.12 while 2.675 (stored just below) goes to 2.67.
pub fn round_money(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Exact error of the product
    let residual = value.mul_add(100.0, -scaled);
    let floor = scaled.floor();

    let cents = if scaled - floor != 0.5 {
        scaled.round()
    } else if residual > 0.0 {
        floor + 1.0
    } else if residual < 0.0 {
        floor
    } else if floor % 2.0 == 0.0 {
        floor
    } else {
        floor + 1.0
    };
    cents / 100.0
}

/// One simulated month
///
/// Monetary fields are rounded to 2 decimals on emission; the engine keeps
/// unrounded values internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Calendar year of this month
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Zero-based simulation month
    pub month_number: u32,
    /// YYYY-MM-DD
    pub date: String,

    /// Subscription revenue (clients + developers)
    pub income: f64,
    pub expenses: f64,
    pub ebitda: f64,

    // Customer stocks; client figures carry the fractional sales ramp
    pub client_count: f64,
    pub new_clients: f64,
    pub paying_clients: f64,
    pub developer_count: u64,
    pub affiliate_count: u64,

    // Headcount
    pub sales_staff: u32,
    pub jr_devs: u32,
    pub admin_staff: u32,
    pub cto_count: u32,
    pub ceo_count: u32,
    pub total_staff: u32,

    // Itemized costs
    pub cto_cost: f64,
    pub ceo_cost: f64,
    /// Base salaries plus commission on sales-acquired clients
    pub sales_cost: f64,
    pub jr_dev_cost: f64,
    pub admin_cost: f64,
    pub infrastructure_cost: f64,
    pub marketing_cost: f64,
    pub affiliate_cost: f64,
    pub other_expenses: f64,
}

/// Monthly rows plus their yearly aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub monthly: Vec<MonthlyRecord>,
    pub yearly: Vec<YearlyRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(685.5), 685.5);
        assert_eq!(round_money(1.234), 1.23);
        assert_eq!(round_money(1.236), 1.24);
        assert_eq!(round_money(-2.5051), -2.51);
        assert_eq!(round_money(0.0), 0.0);
    }

    #[test]
    fn test_round_money_ties_to_even() {
        assert_eq!(round_money(0.125), 0.12);
        assert_eq!(round_money(0.375), 0.38);
        assert_eq!(round_money(-0.125), -0.12);
        // Stored just off the half: no tie, nearest wins
        assert_eq!(round_money(12.345), 12.35);
        assert_eq!(round_money(2.675), 2.67);
        assert_eq!(round_money(1.005), 1.0);
    }
}
