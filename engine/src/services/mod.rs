// Services exposed to the GUI.
pub mod dashboard_service;

pub use dashboard_service::DashboardService;
