//! Calendar-year aggregation of monthly projection rows

mod views;

pub use views::{expense_breakdown, staff_summary, ExpenseBreakdownRow, StaffSummaryRow};

use crate::projection::{round_money, MonthlyRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar year touched by the projection horizon
///
/// Money fields are summed over the year's months. Headcount fields are a
/// snapshot of the year's December row, or of its first row when the year
/// has no December within the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub income: f64,
    pub expenses: f64,
    pub ebitda: f64,
    pub client_count: f64,
    pub paying_clients: f64,
    pub developer_count: u64,
    pub affiliate_count: u64,
    pub sales_staff: u32,
    pub jr_devs: u32,
    pub admin_staff: u32,
    pub cto_count: u32,
    pub ceo_count: u32,
    pub total_staff: u32,
}

/// Headcount fields copied from a single month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HeadcountSnapshot {
    client_count: f64,
    paying_clients: f64,
    developer_count: u64,
    affiliate_count: u64,
    sales_staff: u32,
    jr_devs: u32,
    admin_staff: u32,
    cto_count: u32,
    ceo_count: u32,
    total_staff: u32,
}

impl From<&MonthlyRecord> for HeadcountSnapshot {
    fn from(m: &MonthlyRecord) -> Self {
        Self {
            client_count: m.client_count,
            paying_clients: m.paying_clients,
            developer_count: m.developer_count,
            affiliate_count: m.affiliate_count,
            sales_staff: m.sales_staff,
            jr_devs: m.jr_devs,
            admin_staff: m.admin_staff,
            cto_count: m.cto_count,
            ceo_count: m.ceo_count,
            total_staff: m.total_staff,
        }
    }
}

#[derive(Debug, Default)]
struct YearAccumulator {
    income: f64,
    expenses: f64,
    ebitda: f64,
    snapshot: Option<HeadcountSnapshot>,
}

/// Groups monthly rows into yearly summaries
pub struct YearlyAggregator;

impl YearlyAggregator {
    /// Summarize `monthly` by calendar year, ascending
    ///
    /// Sums are rounded to cents once per year, not per month. The headcount
    /// snapshot is taken first-seen-wins, overwritten by any month 12 row.
    pub fn summarize(monthly: &[MonthlyRecord]) -> Vec<YearlyRecord> {
        let mut years: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

        for m in monthly {
            let acc = years.entry(m.year).or_default();
            acc.income += m.income;
            acc.expenses += m.expenses;
            acc.ebitda += m.ebitda;

            if m.month == 12 || acc.snapshot.is_none() {
                acc.snapshot = Some(HeadcountSnapshot::from(m));
            }
        }

        years
            .into_iter()
            .map(|(year, acc)| {
                let s = acc.snapshot.unwrap_or_default();
                YearlyRecord {
                    year,
                    income: round_money(acc.income),
                    expenses: round_money(acc.expenses),
                    ebitda: round_money(acc.ebitda),
                    client_count: s.client_count,
                    paying_clients: s.paying_clients,
                    developer_count: s.developer_count,
                    affiliate_count: s.affiliate_count,
                    sales_staff: s.sales_staff,
                    jr_devs: s.jr_devs,
                    admin_staff: s.admin_staff,
                    cto_count: s.cto_count,
                    ceo_count: s.ceo_count,
                    total_staff: s.total_staff,
                }
            })
            .collect()
    }
}
