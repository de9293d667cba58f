use thiserror::Error;

use crate::forecast::ForecastError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Market data request failed: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Market data provider returned {status}: {message}")]
    ProviderError { status: u16, message: String },

    #[error("Market data decode error: {source}")]
    DecodeError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Forecast error: {source}")]
    ForecastError {
        #[from]
        source: ForecastError,
    },
}

impl EngineError {
    /// Short label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::ConfigError(_) => "config",
            EngineError::HttpError { .. } => "http",
            EngineError::ProviderError { .. } => "provider",
            EngineError::DecodeError { .. } => "decode",
            EngineError::ForecastError { .. } => "forecast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_error_converts_with_context() {
        let err: EngineError = ForecastError::InsufficientData { rows: 1 }.into();
        assert_eq!(err.kind(), "forecast");
        assert!(err.to_string().contains("less than 2"));
    }

    #[test]
    fn test_provider_error_message() {
        let err = EngineError::ProviderError {
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert_eq!(err.to_string(), "Market data provider returned 429: Too Many Requests");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = EngineError::from(source);
        assert_eq!(err.kind(), "decode");
    }
}
