//! Configuration module for the pattern-scope application.

pub mod analysis;
pub mod api;

mod debug; // Private; files must use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use analysis::{ReconcileConfig, RECONCILE};
pub use api::API;
