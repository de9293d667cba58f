use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode, Url};
use shared::models::PriceTable;

use crate::config::ProviderSettings;
use crate::data::provider::MarketDataProvider;
use crate::data::yahoo_response::ChartEnvelope;
use crate::error::EngineError;

const CHART_PATH: [&str; 3] = ["v8", "finance", "chart"];

/// Daily bars from the Yahoo Finance chart endpoint.
pub struct YahooChartProvider {
    client: Client,
    base_url: Url,
    interval: String,
}

impl YahooChartProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, EngineError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| EngineError::ConfigError(format!("invalid user agent: {}", e)))?,
        );
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| EngineError::ConfigError(format!("invalid provider url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(EngineError::ConfigError(format!(
                "provider url cannot take a path: {}",
                base_url
            )));
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            interval: settings.interval.clone(),
        })
    }

    /// The symbol is one percent-encoded path segment, so `#`, `?` or `/` in it
    /// cannot redirect the request to another symbol.
    fn chart_url(&self, symbol: &str) -> Result<Url, EngineError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                EngineError::ConfigError(format!("provider url cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(CHART_PATH)
            .push(symbol);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceTable, EngineError> {
        let query = [
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", self.interval.clone()),
            ("events", "history".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ];

        tracing::debug!(symbol = %symbol, %start, %end, "Requesting chart data");
        let response = self.client.get(self.chart_url(symbol)?).query(&query).send().await?;
        let status = response.status();

        // Unknown symbols come back as 404 with a "Not Found" chart error.
        if status == StatusCode::NOT_FOUND {
            tracing::info!(symbol = %symbol, "Provider does not know symbol");
            return Ok(PriceTable::empty(symbol));
        }

        let body = response.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<ChartEnvelope>(&body) {
                Ok(ChartEnvelope { chart }) => chart
                    .error
                    .map(|e| e.description)
                    .unwrap_or_else(|| status.to_string()),
                Err(_) => status.to_string(),
            };
            return Err(EngineError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body)?;
        if let Some(error) = envelope.chart.error {
            if error.is_not_found() {
                return Ok(PriceTable::empty(symbol));
            }
            return Err(EngineError::ProviderError {
                status: status.as_u16(),
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let bars = envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_bars())
            .unwrap_or_default();

        Ok(PriceTable::new(symbol, bars))
    }
}
