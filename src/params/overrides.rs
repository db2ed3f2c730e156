//! Partial parameter updates
//!
//! Fields present in the update replace the base value; absent fields keep
//! it. The merged set is validated before it is returned.

use super::{loader::parse_start_date, ForecastParameters, GrowthRates};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Optional replacement for each field of `ForecastParameters`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    pub initial_clients: Option<u64>,
    pub initial_developers: Option<u64>,
    pub initial_affiliates: Option<u64>,
    pub client_growth_rates: Option<GrowthRates>,
    pub developer_growth_rates: Option<GrowthRates>,
    pub affiliate_growth_rates: Option<GrowthRates>,
    pub subscription_price: Option<f64>,
    pub affiliate_commission: Option<f64>,
    pub free_months: Option<u32>,
    pub conversion_rate: Option<f64>,
    pub cto_start_month: Option<u32>,
    pub ceo_start_month: Option<u32>,
    pub jr_dev_start_month: Option<u32>,
    pub admin_start_month: Option<u32>,
    pub sales_start_month: Option<u32>,
    pub sales_hiring_interval: Option<u32>,
    pub max_sales_staff: Option<u32>,
    pub cto_salary: Option<f64>,
    pub ceo_salary: Option<f64>,
    pub sales_base_salary: Option<f64>,
    pub sales_commission: Option<f64>,
    pub jr_dev_salary: Option<f64>,
    pub admin_salary: Option<f64>,
    pub marketing_percentage: Option<f64>,
    pub infrastructure_cost_per_user: Option<f64>,
    pub other_expenses_percentage: Option<f64>,
}

impl ParameterOverrides {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `base`, returning a new validated parameter set
    pub fn apply_to(&self, base: &ForecastParameters) -> Result<ForecastParameters> {
        let mut p = base.clone();

        if let Some(date) = &self.start_date {
            p.start_date = parse_start_date(date)?;
        }

        p.initial_clients = self.initial_clients.unwrap_or(p.initial_clients);
        p.initial_developers = self.initial_developers.unwrap_or(p.initial_developers);
        p.initial_affiliates = self.initial_affiliates.unwrap_or(p.initial_affiliates);

        let tables = [
            ("client_growth_rates", &self.client_growth_rates, &mut p.client_growth_rates),
            ("developer_growth_rates", &self.developer_growth_rates, &mut p.developer_growth_rates),
            ("affiliate_growth_rates", &self.affiliate_growth_rates, &mut p.affiliate_growth_rates),
        ];
        for (name, update, target) in tables {
            if let Some(rates) = update {
                if rates.is_empty() {
                    log::warn!("Override clears growth table '{}'", name);
                }
                *target = rates.clone();
            }
        }

        p.subscription_price = self.subscription_price.unwrap_or(p.subscription_price);
        p.affiliate_commission = self.affiliate_commission.unwrap_or(p.affiliate_commission);
        p.free_months = self.free_months.unwrap_or(p.free_months);
        p.conversion_rate = self.conversion_rate.unwrap_or(p.conversion_rate);

        p.cto_start_month = self.cto_start_month.unwrap_or(p.cto_start_month);
        p.ceo_start_month = self.ceo_start_month.unwrap_or(p.ceo_start_month);
        p.jr_dev_start_month = self.jr_dev_start_month.unwrap_or(p.jr_dev_start_month);
        p.admin_start_month = self.admin_start_month.unwrap_or(p.admin_start_month);
        p.sales_start_month = self.sales_start_month.unwrap_or(p.sales_start_month);
        p.sales_hiring_interval = self.sales_hiring_interval.unwrap_or(p.sales_hiring_interval);
        p.max_sales_staff = self.max_sales_staff.unwrap_or(p.max_sales_staff);

        p.cto_salary = self.cto_salary.unwrap_or(p.cto_salary);
        p.ceo_salary = self.ceo_salary.unwrap_or(p.ceo_salary);
        p.sales_base_salary = self.sales_base_salary.unwrap_or(p.sales_base_salary);
        p.sales_commission = self.sales_commission.unwrap_or(p.sales_commission);
        p.jr_dev_salary = self.jr_dev_salary.unwrap_or(p.jr_dev_salary);
        p.admin_salary = self.admin_salary.unwrap_or(p.admin_salary);

        p.marketing_percentage = self.marketing_percentage.unwrap_or(p.marketing_percentage);
        p.infrastructure_cost_per_user = self
            .infrastructure_cost_per_user
            .unwrap_or(p.infrastructure_cost_per_user);
        p.other_expenses_percentage = self
            .other_expenses_percentage
            .unwrap_or(p.other_expenses_percentage);

        p.validate()?;
        Ok(p)
    }
}
