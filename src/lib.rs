//! Hex Power (workspace facade crate).
//!
//! Re-exports `hex_power::{types, core, engine, adapter}` so binaries and
//! integration tests can depend on one package while the implementation lives
//! in dedicated crates under `crates/`.

pub use hex_power_adapter as adapter;
pub use hex_power_core as core;
pub use hex_power_engine as engine;
pub use hex_power_types as types;
