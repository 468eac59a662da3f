//! Forecast providers
//!
//! A provider is the seam where a real drought model plugs in. The static
//! provider serves a fixed forecast built from configuration.

use tracing::debug;

use crate::Result;
use crate::config::ForecastConfig;
use crate::models::Forecast;

pub trait ForecastProvider: Send + Sync {
    /// Current forecast, one result per horizon in reporting order
    fn get_forecast(&self) -> Result<Forecast>;
}

/// Serves the same forecast for every request
#[derive(Debug, Clone)]
pub struct StaticForecastProvider {
    forecast: Forecast,
}

impl StaticForecastProvider {
    #[must_use]
    pub fn new(forecast: Forecast) -> Self {
        Self { forecast }
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        let forecast = Forecast::new(
            [config.next_month, config.two_months, config.three_months],
            config.accuracy,
        )?;
        Ok(Self::new(forecast))
    }
}

impl ForecastProvider for StaticForecastProvider {
    fn get_forecast(&self) -> Result<Forecast> {
        debug!(accuracy = self.forecast.accuracy(), "Serving static forecast");
        Ok(self.forecast.clone())
    }
}
