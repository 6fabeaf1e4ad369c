//! Error types for the search index gateway.
//!
//! `EngineError` covers everything the engine client can fail with, and
//! `GatewayError` adds the one validation failure the gateway raises itself.

mod engine_error;
mod gateway_error;

pub use engine_error::EngineError;
pub use gateway_error::GatewayError;
