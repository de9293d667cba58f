// Global application state for the GUI: the two dashboard inputs.
// Provided once at the root as a `Signal<AppState>`; every tab resource reads it,
// so any change re-runs both tabs.

use engine::models::DashboardInputs;
use shared::utils::clamp_years;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub ticker: String,
    pub years: u32,
}

impl AppState {
    pub fn new(default_years: u32) -> Self {
        Self {
            ticker: String::new(),
            years: clamp_years(default_years),
        }
    }

    pub fn set_ticker(&mut self, ticker: String) {
        self.ticker = ticker;
    }

    pub fn set_years(&mut self, years: u32) {
        self.years = clamp_years(years);
    }

    pub fn inputs(&self) -> DashboardInputs {
        DashboardInputs::new(self.ticker.clone(), self.years)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Which tab body is visible. Both stay mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Current,
    Forecast,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Current, Tab::Forecast];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Current => "Current",
            Tab::Forecast => "Forecast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_empty_ticker() {
        let state = AppState::default();
        assert!(state.inputs().symbol().is_none());
        assert_eq!(state.years, 1);
    }

    #[test]
    fn test_years_are_kept_in_slider_bounds() {
        let mut state = AppState::new(0);
        assert_eq!(state.years, 1);
        state.set_years(25);
        assert_eq!(state.years, 10);
        state.set_ticker("goog".to_string());
        assert_eq!(state.inputs(), DashboardInputs::new("goog", 10));
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<&str> = Tab::ALL.iter().map(Tab::label).collect();
        assert_eq!(labels, vec!["Current", "Forecast"]);
    }
}
