// Chart components
pub mod components_chart;
pub mod line_chart;

pub use components_chart::ComponentsChart;
pub use line_chart::LineChartView;
