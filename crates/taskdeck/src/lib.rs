/*
[INPUT]:  Public API exports for the taskdeck crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod intent;
pub mod store;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigOverrides};
pub use intent::Intent;
pub use store::{ErrorMessage, Filter, StoreConfig, StoreState, TaskStore};
