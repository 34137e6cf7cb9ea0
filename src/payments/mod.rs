//! EcoCash payment operations
//!
//! Caller-facing request/response types, the gateway wire format, and the
//! client that maps one onto the other.

pub mod client;
pub mod types;
pub mod wire;
