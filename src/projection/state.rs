//! Mutable state carried from month to month within a single run

use crate::params::ForecastParameters;

/// Clients that joined in the same month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientCohort {
    /// Simulation month the cohort joined
    pub month_joined: u32,
    /// Clients acquired that month (fractional when sales-driven)
    pub size: f64,
}

impl ClientCohort {
    /// Paying clients this cohort contributes in `month`
    ///
    /// Nothing during the trial, `floor(size * conversion_rate)` in the month
    /// the trial ends, and the full cohort size afterwards. The conversion is
    /// never written back into the cohort.
    pub fn paying_in_month(&self, month: u32, free_months: u32, conversion_rate: f64) -> f64 {
        if month < self.month_joined {
            return 0.0;
        }
        let age = month - self.month_joined;
        if age < free_months {
            0.0
        } else if age == free_months {
            (self.size * conversion_rate).floor()
        } else {
            self.size
        }
    }
}

/// Headcount by role
///
/// Single-head roles step from 0 to 1 once and stay hired; sales grows by
/// one per hiring slot up to its cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaffRoster {
    pub cto: u32,
    pub ceo: u32,
    pub jr_devs: u32,
    pub admin: u32,
    pub sales: u32,
}

impl StaffRoster {
    /// Apply this month's hiring triggers
    pub fn hire_for_month(&mut self, month: u32, params: &ForecastParameters) {
        hire_once(&mut self.cto, month, params.cto_start_month, "CTO");
        hire_once(&mut self.ceo, month, params.ceo_start_month, "CEO");
        hire_once(&mut self.jr_devs, month, params.jr_dev_start_month, "junior developer");
        hire_once(&mut self.admin, month, params.admin_start_month, "admin");

        if is_sales_hiring_month(month, params) && self.sales < params.max_sales_staff {
            self.sales += 1;
            log::trace!("Month {}: sales hire #{}", month, self.sales);
        }
    }

    pub fn total(&self) -> u32 {
        self.cto + self.ceo + self.jr_devs + self.admin + self.sales
    }
}

fn hire_once(count: &mut u32, month: u32, start_month: u32, role: &str) {
    if month >= start_month && *count == 0 {
        *count = 1;
        log::trace!("Month {}: {} hired", month, role);
    }
}

/// True on the sales start month and every `sales_hiring_interval` after it
fn is_sales_hiring_month(month: u32, params: &ForecastParameters) -> bool {
    month >= params.sales_start_month
        && (month - params.sales_start_month) % params.sales_hiring_interval.max(1) == 0
}

/// Running stocks, staff and cohort book for one projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    pub clients: f64,
    pub developers: u64,
    pub affiliates: u64,
    pub staff: StaffRoster,
    cohorts: Vec<ClientCohort>,
}

impl ProjectionState {
    pub fn new(params: &ForecastParameters) -> Self {
        Self {
            clients: params.initial_clients as f64,
            developers: params.initial_developers,
            affiliates: params.initial_affiliates,
            staff: StaffRoster::default(),
            cohorts: Vec::new(),
        }
    }

    /// Record a new cohort; empty months create none
    pub fn add_cohort(&mut self, month: u32, size: f64) {
        if size > 0.0 {
            self.cohorts.push(ClientCohort {
                month_joined: month,
                size,
            });
        }
    }

    pub fn cohorts(&self) -> &[ClientCohort] {
        &self.cohorts
    }

    /// Paying clients in `month`, rescanned across every cohort to date
    pub fn paying_clients(&self, month: u32, free_months: u32, conversion_rate: f64) -> f64 {
        self.cohorts
            .iter()
            .map(|c| c.paying_in_month(month, free_months, conversion_rate))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_conversion_timeline() {
        let cohort = ClientCohort {
            month_joined: 4,
            size: 15.0,
        };

        // Trial period
        assert_eq!(cohort.paying_in_month(4, 2, 0.75), 0.0);
        assert_eq!(cohort.paying_in_month(5, 2, 0.75), 0.0);
        // Conversion month: floor(15 * 0.75) = 11
        assert_eq!(cohort.paying_in_month(6, 2, 0.75), 11.0);
        // Afterwards the full cohort counts
        assert_eq!(cohort.paying_in_month(7, 2, 0.75), 15.0);
        assert_eq!(cohort.paying_in_month(40, 2, 0.75), 15.0);
    }

    #[test]
    fn test_cohort_without_trial() {
        let cohort = ClientCohort {
            month_joined: 0,
            size: 37.5,
        };
        assert_eq!(cohort.paying_in_month(0, 0, 0.5), 18.0);
        assert_eq!(cohort.paying_in_month(1, 0, 0.5), 37.5);
    }

    #[test]
    fn test_single_head_roles_hire_once() {
        let params = ForecastParameters {
            cto_start_month: 2,
            ceo_start_month: 4,
            jr_dev_start_month: 0,
            admin_start_month: 100,
            ..Default::default()
        };
        let mut staff = StaffRoster::default();

        staff.hire_for_month(0, &params);
        assert_eq!((staff.cto, staff.ceo, staff.jr_devs, staff.admin), (0, 0, 1, 0));

        staff.hire_for_month(1, &params);
        staff.hire_for_month(2, &params);
        assert_eq!(staff.cto, 1);

        for month in 3..72 {
            staff.hire_for_month(month, &params);
        }
        assert_eq!((staff.cto, staff.ceo, staff.jr_devs, staff.admin), (1, 1, 1, 0));
    }

    #[test]
    fn test_sales_hiring_cadence_and_cap() {
        let params = ForecastParameters {
            sales_start_month: 3,
            sales_hiring_interval: 3,
            max_sales_staff: 10,
            ..Default::default()
        };
        let mut staff = StaffRoster::default();
        let mut hire_months = Vec::new();

        for month in 0..72 {
            let before = staff.sales;
            staff.hire_for_month(month, &params);
            if staff.sales > before {
                hire_months.push(month);
            }
        }

        assert_eq!(hire_months, vec![3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
        assert_eq!(staff.sales, 10);
    }

    #[test]
    fn test_paying_clients_rescans_all_cohorts() {
        let params = ForecastParameters::reference();
        let mut state = ProjectionState::new(&params);
        state.add_cohort(0, 15.0);
        state.add_cohort(1, 21.0);
        state.add_cohort(2, 0.0);

        assert_eq!(state.cohorts().len(), 2);
        assert_eq!(state.paying_clients(0, 1, 0.75), 0.0);
        assert_eq!(state.paying_clients(1, 1, 0.75), 11.0);
        // 15 full + floor(21 * 0.75) = 15 + 15
        assert_eq!(state.paying_clients(2, 1, 0.75), 30.0);
        assert_eq!(state.paying_clients(3, 1, 0.75), 36.0);
    }
}
