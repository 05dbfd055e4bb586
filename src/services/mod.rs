//! Backend access
//!
//! - REST client and the [`LudotecaApi`] seam
//! - Tag-based query cache
//! - Background request runner

pub mod api;
pub mod cache;
#[cfg(test)]
pub mod fake;
pub mod request_runner;

pub use api::{HttpBackend, LudotecaApi};
pub use cache::QueryCache;
pub use request_runner::{RequestMessage, RequestRunner};
