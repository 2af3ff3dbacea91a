//! AWS-oriented adapters and handlers for the temperature monitoring app.
//!
//! This crate owns runtime integration details (Lambda handlers, stream and
//! sink adapters) and exposes a single runtime module boundary for the
//! contract and decoding primitives in `tempmon_core`.

pub mod adapters;
pub mod handlers;
pub mod runtime;
