//! Shared value types for the Tana Input client.
//!
//! This crate holds the small building blocks every other crate leans on.
//! None of them perform I/O.
//!
//! ## Architecture
//!
//! - **common** (this crate): Error locations, secrets, status codes
//! - **tana-core**: Configuration, the request dispatcher, and the orchestrator
//! - **tana-input**: Command-line application wiring everything together

pub mod bearer_token;
pub mod error;
pub mod http_status;

pub use bearer_token::BearerToken;
pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
