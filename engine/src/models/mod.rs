// Engine-side view models. Table and bar types live in the `shared` crate.
pub mod dashboard;

pub use dashboard::{
    CurrentView, DashboardInputs, ForecastView, Notice, TabOutcome, EMPTY_TICKER_WARNING,
    INVALID_TICKER_ERROR,
};
