#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{ScanRequest, ScanService, Week52High};
pub use domain::{Marker, PatternKind, PriceBar, SeriesSelector};
pub use engine::{OverlaySelection, ScanSnapshot};
pub use ui::PatternScopeApp;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the pattern scan backend
    #[arg(long, default_value = config::API.default_base_url)]
    pub base_url: String,

    /// Symbol to pre-fill in the scan form
    #[arg(long)]
    pub symbol: Option<String>,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    service: ScanService,
    runtime: tokio::runtime::Handle,
    initial_symbol: Option<String>,
) -> Box<dyn eframe::App> {
    let mut app = ui::PatternScopeApp::new(cc, service, runtime);
    if let Some(symbol) = initial_symbol {
        app.set_initial_symbol(symbol);
    }
    Box::new(app)
}
