pub mod chart;
pub mod models;
pub mod utils;
