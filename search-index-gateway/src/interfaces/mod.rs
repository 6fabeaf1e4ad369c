//! Interface definitions for the search engine client.
//!
//! This module defines the abstract `EngineClient` trait that allows
//! for dependency injection and swappable search backend implementations.

mod engine_client;

pub use engine_client::EngineClient;
