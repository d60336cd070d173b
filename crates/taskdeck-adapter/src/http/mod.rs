/*
[INPUT]:  HTTP client configuration and todo collection endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod todos;

pub use error::{Result, TodoApiError};

pub use client::{ClientConfig, TodoClient};
