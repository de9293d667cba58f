// Engine settings. Built-in defaults, optionally overridden from the environment.
use serde::Deserialize;

use crate::forecast::ForecastError;

pub const PROVIDER_URL_ENV: &str = "MARKET_DASHBOARD_PROVIDER_URL";
pub const USER_AGENT_ENV: &str = "MARKET_DASHBOARD_USER_AGENT";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    /// The chart endpoint rejects requests without a browser-like agent.
    pub user_agent: String,
    pub interval: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            interval: "1d".to_string(),
        }
    }
}

/// Knobs of the additive forecasting model. The defaults follow Prophet's.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ForecastSettings {
    pub n_changepoints: usize,
    /// Fraction of the history in which changepoints may be placed.
    pub changepoint_range: f64,
    pub changepoint_prior_scale: f64,
    pub seasonality_prior_scale: f64,
    pub yearly_order: usize,
    pub weekly_order: usize,
    /// Coverage of the `yhat_lower..yhat_upper` interval.
    pub interval_width: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        ForecastSettings {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            yearly_order: 10,
            weekly_order: 3,
            interval_width: 0.8,
        }
    }
}

impl ForecastSettings {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidSettings(format!(
                "interval_width must be in (0, 1), got {}",
                self.interval_width
            )));
        }
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(ForecastError::InvalidSettings(format!(
                "changepoint_range must be in (0, 1], got {}",
                self.changepoint_range
            )));
        }
        if self.changepoint_prior_scale <= 0.0 || self.seasonality_prior_scale <= 0.0 {
            return Err(ForecastError::InvalidSettings(
                "prior scales must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub provider: ProviderSettings,
    pub forecast: ForecastSettings,
}

impl EngineSettings {
    /// Defaults with the provider endpoint and user agent taken from the environment when set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(PROVIDER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::info!(base_url = %url, "Provider base URL overridden from environment");
            self.provider.base_url = url;
        }
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            self.provider.user_agent = agent;
        }
        self
    }
}
