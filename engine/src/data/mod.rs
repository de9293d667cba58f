// Market data: provider abstraction, the Yahoo chart provider and the loader used by the dashboard.
pub mod loader;
pub mod provider;
pub mod yahoo;
pub mod yahoo_response;

pub use loader::{load_data, normalize_ticker};
pub use provider::MarketDataProvider;
pub use yahoo::YahooChartProvider;
