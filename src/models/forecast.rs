//! Drought forecast model: horizons, severities and the per-horizon results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DroughtWatchError, Result};

/// Forecast time offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Horizon {
    NextMonth,
    TwoMonths,
    ThreeMonths,
}

impl Horizon {
    /// All horizons in reporting order
    pub const ALL: [Horizon; 3] = [Horizon::NextMonth, Horizon::TwoMonths, Horizon::ThreeMonths];

    /// Number of months ahead of the issue date
    #[must_use]
    pub fn months_ahead(self) -> u8 {
        match self {
            Horizon::NextMonth => 1,
            Horizon::TwoMonths => 2,
            Horizon::ThreeMonths => 3,
        }
    }

    /// Key used for this horizon in JSON payloads
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Horizon::NextMonth => "next_month",
            Horizon::TwoMonths => "two_months",
            Horizon::ThreeMonths => "three_months",
        }
    }
}

/// Categorical drought intensity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "normal", alias = "NORMAL")]
    Normal,
    #[serde(alias = "moderate", alias = "MODERATE")]
    Moderate,
    #[serde(alias = "severe", alias = "SEVERE")]
    Severe,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity predicted for a single horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastResult {
    pub horizon: Horizon,
    pub severity: Severity,
    /// Model confidence in [0.0, 1.0]
    pub confidence: f64,
}

impl ForecastResult {
    pub fn new(horizon: Horizon, severity: Severity, confidence: f64) -> Result<Self> {
        validate_confidence(confidence)?;
        Ok(Self {
            horizon,
            severity,
            confidence,
        })
    }
}

/// A complete forecast: one result per horizon, always in [`Horizon::ALL`] order
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    results: [ForecastResult; 3],
    accuracy: f64,
}

impl Forecast {
    /// Build a forecast from one severity per horizon sharing a single confidence
    pub fn new(severities: [Severity; 3], confidence: f64) -> Result<Self> {
        validate_confidence(confidence)?;
        let [next, two, three] = severities;
        Ok(Self {
            results: [
                ForecastResult::new(Horizon::NextMonth, next, confidence)?,
                ForecastResult::new(Horizon::TwoMonths, two, confidence)?,
                ForecastResult::new(Horizon::ThreeMonths, three, confidence)?,
            ],
            accuracy: confidence,
        })
    }

    /// Build a forecast from individually produced results.
    ///
    /// The results must cover every horizon exactly once, in reporting order.
    /// The overall accuracy is the lowest per-horizon confidence.
    pub fn from_results(results: Vec<ForecastResult>) -> Result<Self> {
        let results: [ForecastResult; 3] = results.try_into().map_err(|got: Vec<_>| {
            DroughtWatchError::validation(format!(
                "forecast must contain exactly 3 horizons, got {}",
                got.len()
            ))
        })?;

        for (result, expected) in results.iter().zip(Horizon::ALL) {
            if result.horizon != expected {
                return Err(DroughtWatchError::validation(format!(
                    "expected horizon '{}' but found '{}'",
                    expected.key(),
                    result.horizon.key()
                )));
            }
            validate_confidence(result.confidence)?;
        }

        let accuracy = results
            .iter()
            .map(|r| r.confidence)
            .fold(1.0_f64, f64::min);

        Ok(Self { results, accuracy })
    }

    #[must_use]
    pub fn results(&self) -> &[ForecastResult; 3] {
        &self.results
    }

    #[must_use]
    pub fn severity(&self, horizon: Horizon) -> Severity {
        // results are stored in Horizon::ALL order
        self.results[horizon.months_ahead() as usize - 1].severity
    }

    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

fn validate_confidence(confidence: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(DroughtWatchError::validation(format!(
            "confidence must be within [0, 1], got {confidence}"
        )));
    }
    Ok(())
}
