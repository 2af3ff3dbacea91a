//! Module boundary over the core contract and decoding primitives.

pub use tempmon_core::contract;
pub use tempmon_core::decode;
