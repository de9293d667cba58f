// Engine configuration: provider endpoint and forecaster defaults.
pub mod settings;

pub use settings::{EngineSettings, ForecastSettings, ProviderSettings};
