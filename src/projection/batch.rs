//! Independent scenario runs in parallel

use super::{forecast, ForecastResult};
use crate::error::Result;
use crate::params::ForecastParameters;
use rayon::prelude::*;

/// Named result of one scenario in a batch
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ForecastResult>,
}

/// Forecast each named scenario on the rayon pool
///
/// Runs share no state; a failing scenario does not stop the others.
/// Outcomes come back in input order.
pub fn run_batch(scenarios: &[(String, ForecastParameters)]) -> Vec<ScenarioOutcome> {
    log::info!("Running {} scenarios", scenarios.len());

    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|(name, params)| ScenarioOutcome {
            name: name.clone(),
            result: forecast(params),
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        log::warn!("{} of {} scenarios failed", failed, outcomes.len());
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let scenarios = vec![
            ("base".to_string(), ForecastParameters::reference()),
            (
                "broken".to_string(),
                ForecastParameters {
                    sales_hiring_interval: 0,
                    ..Default::default()
                },
            ),
            (
                "premium".to_string(),
                ForecastParameters {
                    subscription_price: 50.0,
                    ..Default::default()
                },
            ),
        ];

        let outcomes = run_batch(&scenarios);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["base", "broken", "premium"]);

        assert!(matches!(
            outcomes[1].result,
            Err(ForecastError::InvalidHiringInterval(0))
        ));

        let base = outcomes[0].result.as_ref().unwrap();
        let premium = outcomes[2].result.as_ref().unwrap();
        assert_eq!(base.monthly.len(), 72);
        // Same parameters as a direct call
        assert_eq!(base, &forecast(&ForecastParameters::reference()).unwrap());
        assert_eq!(premium.monthly[0].income, 2600.0);
    }
}
