// engine/src/services/dashboard_service/mod.rs
// Hub for the dashboard service: the DashboardService struct plus one handler
// module per tab and the guard helpers they share.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{EngineSettings, ForecastSettings};
use crate::data::{MarketDataProvider, YahooChartProvider};
use crate::error::EngineError;
use crate::models::{CurrentView, DashboardInputs, ForecastView, TabOutcome};

pub mod current;
pub mod forecast;
pub mod helpers;

/// Entry point the GUI calls for each tab. Every call fetches afresh; nothing is cached.
#[derive(Clone)]
pub struct DashboardService {
    provider: Arc<dyn MarketDataProvider>,
    forecast_settings: ForecastSettings,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, forecast_settings: ForecastSettings) -> Self {
        DashboardService {
            provider,
            forecast_settings,
        }
    }

    /// Service backed by the Yahoo chart provider.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, EngineError> {
        settings.forecast.validate()?;
        let provider = YahooChartProvider::new(&settings.provider)?;
        tracing::info!(base_url = %settings.provider.base_url, "Dashboard service ready");
        Ok(Self::new(Arc::new(provider), settings.forecast.clone()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn current(
        &self,
        inputs: &DashboardInputs,
        now: DateTime<Utc>,
    ) -> Result<TabOutcome<CurrentView>, EngineError> {
        current::handle_current(self.provider.as_ref(), inputs, now).await
    }

    pub async fn forecast(
        &self,
        inputs: &DashboardInputs,
        now: DateTime<Utc>,
    ) -> Result<TabOutcome<ForecastView>, EngineError> {
        forecast::handle_forecast(self.provider.as_ref(), &self.forecast_settings, inputs, now).await
    }
}
