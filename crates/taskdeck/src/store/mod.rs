/*
[INPUT]:  TaskApi implementation and StoreConfig
[OUTPUT]: TaskStore controller, state snapshot, filter and error types
[POS]:    Store layer - module root
[UPDATE]: When store modules or exports change
*/

mod controller;
mod filter;
mod notice;
mod state;

pub use controller::{StoreConfig, TaskStore};
pub use filter::Filter;
pub use notice::{DEFAULT_ERROR_DISMISS, ErrorMessage};
pub use state::{EditSession, StoreState};
