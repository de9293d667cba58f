// Client side of the engine's dashboard service. Reads the clock and turns
// engine errors into anyhow errors for display.

use anyhow::{anyhow, Result};
use chrono::Utc;
use engine::config::EngineSettings;
use engine::models::{CurrentView, DashboardInputs, ForecastView, TabOutcome};
use engine::DashboardService;

#[derive(Clone)]
pub struct MarketService {
    // Construction can fail (invalid user agent, TLS setup); the error is shown in each tab.
    dashboard: Result<DashboardService, String>,
}

impl MarketService {
    pub fn from_env() -> Self {
        let settings = EngineSettings::from_env();
        let dashboard = DashboardService::from_settings(&settings).map_err(|e| {
            tracing::error!(kind = e.kind(), error = %e, "Failed to create dashboard service");
            e.to_string()
        });
        Self { dashboard }
    }

    fn dashboard(&self) -> Result<&DashboardService> {
        self.dashboard.as_ref().map_err(|e| anyhow!("Market data service unavailable: {}", e))
    }

    pub async fn current(&self, inputs: DashboardInputs) -> Result<TabOutcome<CurrentView>> {
        let outcome = self.dashboard()?.current(&inputs, Utc::now()).await?;
        Ok(outcome)
    }

    pub async fn forecast(&self, inputs: DashboardInputs) -> Result<TabOutcome<ForecastView>> {
        let outcome = self.dashboard()?.forecast(&inputs, Utc::now()).await?;
        Ok(outcome)
    }
}
