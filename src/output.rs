//! CSV export of forecast tables

use crate::error::Result;
use crate::projection::{ForecastResult, MonthlyRecord};
use crate::summary::{expense_breakdown, YearlyRecord};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// One header row, then one row per month
pub fn write_monthly_csv<W: Write>(writer: W, monthly: &[MonthlyRecord]) -> Result<()> {
    write_rows(writer, monthly)
}

pub fn write_yearly_csv<W: Write>(writer: W, yearly: &[YearlyRecord]) -> Result<()> {
    write_rows(writer, yearly)
}

pub fn write_expense_breakdown_csv<W: Write>(writer: W, monthly: &[MonthlyRecord]) -> Result<()> {
    write_rows(writer, &expense_breakdown(monthly))
}

/// Write `<name>_monthly.csv`, `<name>_yearly.csv` and `<name>_expenses.csv`
/// into `dir`, creating it if needed. Returns the written paths.
pub fn write_forecast(dir: &Path, name: &str, result: &ForecastResult) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let monthly_path = dir.join(format!("{}_monthly.csv", name));
    write_monthly_csv(File::create(&monthly_path)?, &result.monthly)?;

    let yearly_path = dir.join(format!("{}_yearly.csv", name));
    write_yearly_csv(File::create(&yearly_path)?, &result.yearly)?;

    let expenses_path = dir.join(format!("{}_expenses.csv", name));
    write_expense_breakdown_csv(File::create(&expenses_path)?, &result.monthly)?;

    log::info!("Wrote '{}' forecast to {}", name, dir.display());
    Ok(vec![monthly_path, yearly_path, expenses_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ForecastParameters;
    use crate::projection;

    #[test]
    fn test_monthly_csv_layout() {
        let monthly = projection::run(&ForecastParameters::reference()).unwrap();
        let mut buf = Vec::new();
        write_monthly_csv(&mut buf, &monthly).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 73);
        assert!(lines[0].starts_with("year,month,month_number,date,income,expenses,ebitda"));
        assert!(lines[1].starts_with("2025,4,0,2025-04-01,1300.0,685.5,614.5"));
    }

    #[test]
    fn test_yearly_and_expense_csv() {
        let result = projection::forecast(&ForecastParameters::reference()).unwrap();

        let mut yearly = Vec::new();
        write_yearly_csv(&mut yearly, &result.yearly).unwrap();
        let yearly = String::from_utf8(yearly).unwrap();
        assert_eq!(yearly.lines().count(), 8);
        assert!(yearly.starts_with("year,income,expenses,ebitda,client_count"));

        let mut expenses = Vec::new();
        write_expense_breakdown_csv(&mut expenses, &result.monthly).unwrap();
        let expenses = String::from_utf8(expenses).unwrap();
        assert!(expenses.lines().next().unwrap().ends_with("other_expenses,total_expenses"));
    }

    #[test]
    fn test_write_forecast_files() {
        let result = projection::forecast(&ForecastParameters::reference()).unwrap();
        let dir = std::env::temp_dir().join(format!("forecast_output_{}", std::process::id()));

        let paths = write_forecast(&dir, "base", &result).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(paths[0].ends_with("base_monthly.csv"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
