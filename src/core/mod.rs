//! Transport, caching and pagination infrastructure.

pub mod cache;
pub mod fetch;
pub mod http;
