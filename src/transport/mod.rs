//! Transport layer for the router console.
//!
//! This module owns the raw TCP stream, the login handshake,
//! and the line-oriented read/write primitives with timeouts.

pub mod config;
mod telnet;

pub use config::{PollingPolicy, TelnetConfig};
pub use telnet::{ConsoleStream, TelnetTransport};
