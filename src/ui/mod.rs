// User interface components
pub mod app;
pub mod app_async;
pub mod config;
pub mod plot_layers;
pub mod ui_panels;
pub mod ui_plot_view;
pub mod ui_render;
pub mod utils;

// Re-export main app
pub use app::PatternScopeApp;
pub use config::UI_CONFIG;
