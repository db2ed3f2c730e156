//! Report views over projection output

use super::YearlyRecord;
use crate::projection::MonthlyRecord;
use serde::{Deserialize, Serialize};

/// Yearly headcount and customer snapshot, without money fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffSummaryRow {
    pub year: i32,
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

/// Itemized expenses for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdownRow {
    pub year: i32,
    pub month: u32,
    pub date: String,
    pub cto_cost: f64,
    pub ceo_cost: f64,
    pub sales_cost: f64,
    pub jr_dev_cost: f64,
    pub admin_cost: f64,
    pub infrastructure_cost: f64,
    pub marketing_cost: f64,
    pub affiliate_cost: f64,
    pub other_expenses: f64,
    pub total_expenses: f64,
}

pub fn staff_summary(yearly: &[YearlyRecord]) -> Vec<StaffSummaryRow> {
    yearly
        .iter()
        .map(|y| StaffSummaryRow {
            year: y.year,
            client_count: y.client_count,
            paying_clients: y.paying_clients,
            developer_count: y.developer_count,
            affiliate_count: y.affiliate_count,
            sales_staff: y.sales_staff,
            jr_devs: y.jr_devs,
            admin_staff: y.admin_staff,
            cto_count: y.cto_count,
            ceo_count: y.ceo_count,
            total_staff: y.total_staff,
        })
        .collect()
}

/// Per-month cost lines alongside the month's total
pub fn expense_breakdown(monthly: &[MonthlyRecord]) -> Vec<ExpenseBreakdownRow> {
    monthly
        .iter()
        .map(|m| ExpenseBreakdownRow {
            year: m.year,
            month: m.month,
            date: m.date.clone(),
            cto_cost: m.cto_cost,
            ceo_cost: m.ceo_cost,
            sales_cost: m.sales_cost,
            jr_dev_cost: m.jr_dev_cost,
            admin_cost: m.admin_cost,
            infrastructure_cost: m.infrastructure_cost,
            marketing_cost: m.marketing_cost,
            affiliate_cost: m.affiliate_cost,
            other_expenses: m.other_expenses,
            total_expenses: m.expenses,
        })
        .collect()
}
