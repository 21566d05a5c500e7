//! Adapter - drive a puzzle over a TCP socket with a JSON line protocol
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects (default: 127.0.0.1:7878)
//! 2. **Handshake**: client sends `hello`, server answers `welcome`
//! 3. **Moves**: `command` rotates or switches one cell; the reply is `moved`
//!    (changed cells with their new power) or `ignored` (nothing happened)
//! 4. **Board management**: `load` replaces the puzzle, `reset` restores it,
//!    `observe` asks for the full state
//!
//! Every client message carries a strictly increasing `seq`; replies echo it.
//!
//! # Environment Variables
//!
//! - `HEX_POWER_HOST`: bind address (default: "127.0.0.1")
//! - `HEX_POWER_PORT`: port number (default: 7878)
//! - `HEX_POWER_MAX_PENDING`: bounded command queue size (default: 16)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"ui","version":"1.0"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"game_id":"hex-power"}
//! Client -> Server: {"type":"command","seq":2,"action":"switch","row":0,"col":1}
//! Server -> Client: {"type":"moved","seq":2,...,"changed":[{"row":0,"col":1,"kind":"dn","direction":"bb","power":1},...],"completed":false}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use hex_power_engine as engine;
pub use hex_power_types as types;

pub use protocol::*;
pub use runtime::{dispatch, Adapter, ClientCommand, InboundCommand, OutboundMessage};
pub use server::{run_server, ServerConfig};
