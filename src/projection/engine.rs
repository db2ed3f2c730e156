//! Month-by-month projection of clients, staff, revenue and expenses

use super::records::{round_money, MonthlyRecord};
use super::state::ProjectionState;
use super::HORIZON_MONTHS;
use crate::error::{ForecastError, Result};
use crate::params::ForecastParameters;
use chrono::{Datelike, Months, NaiveDate};

// ============================================================================
// Acquisition Model Constants
// ============================================================================

/// Share of the client base that organic growth converts into sign-ups
const ORGANIC_ACQUISITION_SHARE: f64 = 0.2;
/// Organic sign-up floor in month 0
const FIRST_MONTH_MIN_ACQUISITION: f64 = 5.0;
/// Organic sign-up floor from month 1 on
const MIN_ACQUISITION: f64 = 10.0;

/// Clients brought in per sales person per month before ramp-up
const CLIENTS_PER_SALES_PERSON: f64 = 20.0;
/// Sales productivity improves by this fraction every `SALES_RAMP_MONTHS`
const SALES_RAMP_STEP: f64 = 0.1;
const SALES_RAMP_MONTHS: u32 = 6;

const MIN_NEW_DEVELOPERS: u64 = 1;
/// Developers added when the developer base is empty
const SEED_DEVELOPERS: u64 = 2;
const MIN_NEW_AFFILIATES: u64 = 2;
/// Affiliates added when the affiliate base is empty
const SEED_AFFILIATES: u64 = 3;

/// Organic client acquisition for `month`
///
/// Month 0 is floored at 5 sign-ups, later months at 10.
pub fn base_acquisition(month: u32, clients: f64, growth_rate: f64) -> f64 {
    let organic = (clients * growth_rate * ORGANIC_ACQUISITION_SHARE).floor();
    let minimum = if month == 0 {
        FIRST_MONTH_MIN_ACQUISITION
    } else {
        MIN_ACQUISITION
    };
    organic.max(minimum)
}

/// Sales-driven acquisition; fractional, not rounded before use
pub fn sales_acquisition(month: u32, sales_staff: u32) -> f64 {
    if sales_staff == 0 {
        return 0.0;
    }
    let ramp = 1.0 + (month / SALES_RAMP_MONTHS) as f64 * SALES_RAMP_STEP;
    CLIENTS_PER_SALES_PERSON * sales_staff as f64 * ramp
}

/// Each affiliate refers half a client per month on average
pub fn affiliate_acquisition(affiliates: u64) -> u64 {
    affiliates / 2
}

pub fn new_developers(developers: u64, growth_rate: f64) -> u64 {
    if developers == 0 {
        return SEED_DEVELOPERS;
    }
    floor_count(developers as f64 * growth_rate).max(MIN_NEW_DEVELOPERS)
}

pub fn new_affiliates(affiliates: u64, growth_rate: f64) -> u64 {
    if affiliates == 0 {
        return SEED_AFFILIATES;
    }
    floor_count(affiliates as f64 * growth_rate).max(MIN_NEW_AFFILIATES)
}

/// Float-to-int casts saturate, so counts past `u64::MAX` clamp there
fn floor_count(value: f64) -> u64 {
    value.floor().max(0.0) as u64
}

/// Projection engine for a single scenario
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ForecastParameters,
}

impl ProjectionEngine {
    /// Create an engine, rejecting parameters the arithmetic cannot handle
    pub fn new(params: ForecastParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ForecastParameters {
        &self.params
    }

    /// Project every month of the horizon, in month order
    pub fn run(&self) -> Result<Vec<MonthlyRecord>> {
        let mut state = ProjectionState::new(&self.params);
        let mut rows = Vec::with_capacity(HORIZON_MONTHS as usize);

        for month in 0..HORIZON_MONTHS {
            rows.push(self.project_month(&mut state, month)?);
        }

        if let Some(last) = rows.last() {
            log::debug!(
                "Projected {} months from {}: {} cohorts, final clients {:.0}, final EBITDA {:.2}",
                rows.len(),
                self.params.start_date,
                state.cohorts().len(),
                last.client_count,
                last.ebitda
            );
        }
        Ok(rows)
    }

    /// Advance `state` by one month and emit its record
    fn project_month(&self, state: &mut ProjectionState, month: u32) -> Result<MonthlyRecord> {
        let p = &self.params;
        let date = month_date(p.start_date, month)?;

        // Hiring runs before growth, off the prior month's headcount
        state.staff.hire_for_month(month, p);
        let staff = state.staff;

        // Acquisition
        let client_rate = p.client_growth_rates.rate_for_month(month);
        let developer_rate = p.developer_growth_rates.rate_for_month(month);
        let affiliate_rate = p.affiliate_growth_rates.rate_for_month(month);

        let sales_clients = sales_acquisition(month, staff.sales);
        let new_clients = base_acquisition(month, state.clients, client_rate)
            + sales_clients
            + affiliate_acquisition(state.affiliates) as f64;
        let new_devs = new_developers(state.developers, developer_rate);
        let new_affs = new_affiliates(state.affiliates, affiliate_rate);

        state.add_cohort(month, new_clients);
        state.clients += new_clients;
        state.developers = state.developers.saturating_add(new_devs);
        state.affiliates = state.affiliates.saturating_add(new_affs);

        let paying_clients = state.paying_clients(month, p.free_months, p.conversion_rate);

        // Revenue; affiliate commission is booked as an expense
        let client_revenue = paying_clients * p.subscription_price;
        let developer_revenue = state.developers as f64 * p.subscription_price;
        let revenue = client_revenue + developer_revenue;

        // Expenses
        let cto_cost = staff.cto as f64 * p.cto_salary;
        let ceo_cost = staff.ceo as f64 * p.ceo_salary;
        let jr_dev_cost = staff.jr_devs as f64 * p.jr_dev_salary;
        let admin_cost = staff.admin as f64 * p.admin_salary;
        let sales_cost = staff.sales as f64 * p.sales_base_salary
            + sales_clients * p.subscription_price * p.sales_commission;
        let infrastructure_cost =
            (state.clients + state.developers as f64) * p.infrastructure_cost_per_user;
        let marketing_cost = revenue * p.marketing_percentage;
        let affiliate_cost = state.affiliates as f64 * p.affiliate_commission;
        let other_expenses = revenue * p.other_expenses_percentage;

        let total_expenses = cto_cost
            + ceo_cost
            + jr_dev_cost
            + admin_cost
            + sales_cost
            + infrastructure_cost
            + marketing_cost
            + affiliate_cost
            + other_expenses;
        let ebitda = revenue - total_expenses;

        Ok(MonthlyRecord {
            year: date.year(),
            month: date.month(),
            month_number: month,
            date: date.format("%Y-%m-%d").to_string(),
            income: round_money(revenue),
            expenses: round_money(total_expenses),
            ebitda: round_money(ebitda),
            client_count: state.clients,
            new_clients,
            paying_clients,
            developer_count: state.developers,
            affiliate_count: state.affiliates,
            sales_staff: staff.sales,
            jr_devs: staff.jr_devs,
            admin_staff: staff.admin,
            cto_count: staff.cto,
            ceo_count: staff.ceo,
            total_staff: staff.total(),
            cto_cost: round_money(cto_cost),
            ceo_cost: round_money(ceo_cost),
            sales_cost: round_money(sales_cost),
            jr_dev_cost: round_money(jr_dev_cost),
            admin_cost: round_money(admin_cost),
            infrastructure_cost: round_money(infrastructure_cost),
            marketing_cost: round_money(marketing_cost),
            affiliate_cost: round_money(affiliate_cost),
            other_expenses: round_money(other_expenses),
        })
    }
}

/// Calendar date of simulation `month`; day-of-month clamps to the month's end
fn month_date(start: NaiveDate, month: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(month))
        .ok_or(ForecastError::DateOverflow { month })
}
