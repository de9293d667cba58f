// Engine library root
// Market data retrieval, the additive forecaster, figure builders and the
// dashboard service the GUI drives.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod models;
pub mod services;

pub use error::EngineError;
pub use services::DashboardService;
