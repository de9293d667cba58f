// GUI components module
pub mod alert;
pub mod chart;
pub mod current_tab;
pub mod data_table;
pub mod forecast_tab;
pub mod spinner;
pub mod tabs;

pub use current_tab::CurrentTab;
pub use forecast_tab::ForecastTab;
pub use tabs::TabBar;
