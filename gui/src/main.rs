// GUI main entry point using Dioxus
#![allow(non_snake_case)] // Common for Dioxus components

use dioxus::prelude::*;
use dioxus_desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;

fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() {
    // RUST_LOG controls verbosity; info when unset.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    // The window is sized from the embedded configuration; App loads it again into context.
    let app_config = AppConfig::load_or_default();
    tracing::info!(version = %app_config.version, "Starting Market Dashboard (Dioxus Desktop)");

    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(
                app_config.app.window_width as f64,
                app_config.app.window_height as f64,
            )),
    );

    LaunchBuilder::desktop().with_cfg(desktop_config).launch(App);

    tracing::info!("Market Dashboard finished.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("engine=debug".to_string())).to_string(), "engine=debug");
    }
}
