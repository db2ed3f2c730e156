//! Load parameter sets from JSON
//!
//! This is the decoding boundary: growth tables stored as JSON-encoded
//! strings (e.g. a text column holding "[0.1, 0.12]") are decoded here, so
//! the projection engine only ever sees `GrowthRates`.

use super::{ForecastParameters, GrowthRates, ParameterOverrides};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Accepted encodings of a growth table
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGrowthRates {
    List(Vec<f64>),
    Encoded(String),
}

impl<'de> Deserialize<'de> for GrowthRates {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawGrowthRates::deserialize(deserializer)? {
            RawGrowthRates::List(rates) => Ok(GrowthRates::new(rates)),
            RawGrowthRates::Encoded(text) => serde_json::from_str::<Vec<f64>>(&text)
                .map(GrowthRates::new)
                .map_err(|e| serde::de::Error::custom(format!("encoded growth table: {}", e))),
        }
    }
}

/// Parse a `YYYY-MM-DD` start date
pub fn parse_start_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ForecastError::InvalidStartDate(text.to_string()))
}

/// Load and validate a parameter set from a JSON file
///
/// Missing fields take their reference defaults.
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<ForecastParameters> {
    let file = File::open(path.as_ref())?;
    let params = load_parameters_from_reader(BufReader::new(file))?;
    log::debug!("Loaded parameters from {}", path.as_ref().display());
    Ok(params)
}

/// Load and validate a parameter set from any JSON reader
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<ForecastParameters> {
    let params: ForecastParameters = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}

/// Load a partial parameter update from a JSON file
pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<ParameterOverrides> {
    let file = File::open(path.as_ref())?;
    let overrides = serde_json::from_reader(BufReader::new(file))?;
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let json = r#"{ "initial_clients": 250, "free_months": 2 }"#;
        let params = load_parameters_from_reader(json.as_bytes()).unwrap();

        assert_eq!(params.initial_clients, 250);
        assert_eq!(params.free_months, 2);
        assert_eq!(params.initial_developers, 50);
        assert_eq!(params.subscription_price, 25.0);
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn test_growth_table_as_list_or_encoded_string() {
        let json = r#"{
            "start_date": "2024-01-31",
            "client_growth_rates": [0.2, 0.3],
            "developer_growth_rates": "[0.05, 0.06]"
        }"#;
        let params = load_parameters_from_reader(json.as_bytes()).unwrap();

        assert_eq!(params.client_growth_rates.as_slice(), &[0.2, 0.3]);
        assert_eq!(params.developer_growth_rates.as_slice(), &[0.05, 0.06]);
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_malformed_encoded_table() {
        let json = r#"{ "client_growth_rates": "not a list" }"#;
        let err = load_parameters_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ForecastError::Json(_)));
    }

    #[test]
    fn test_loaded_parameters_are_validated() {
        let json = r#"{ "affiliate_growth_rates": [] }"#;
        let err = load_parameters_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyGrowthTable { .. }));
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(
            parse_start_date("2025-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert!(matches!(
            parse_start_date("04/01/2025"),
            Err(ForecastError::InvalidStartDate(_))
        ));
    }
}
