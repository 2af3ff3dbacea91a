//! Shared temperature-monitoring domain primitives.
//!
//! This crate owns the handler request/response contracts, boundary
//! validation, and record payload decoding. It intentionally excludes AWS
//! SDK and Lambda runtime concerns; those live in `crates/tempmon_lambda`.

pub mod contract;
pub mod decode;
