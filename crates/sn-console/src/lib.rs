//! SnowLink interactive console — library crate.
//!
//! The line-handling core lives here so it can be exercised against a
//! mock transport; `main.rs` only wires config, client, and the loop.

pub mod repl;
