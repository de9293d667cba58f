// Bridges between the GUI and the engine library
pub mod market_service;

pub use market_service::MarketService;
