//! # Rostelnet
//!
//! Async telnet console scraper library for MikroTik RouterOS automation.
//!
//! Rostelnet drives a router's interactive text console over a raw TCP
//! stream: it logs in, issues one command at a time, harvests the
//! unframed response with quiescence polling, strips the console's
//! control sequences, detects the embedded failure marker, and extracts
//! structured records from semi-tabular output via declarative field
//! schemas.
//!
//! ## Features
//!
//! - Async telnet console sessions via tokio
//! - Quiescence-based response harvesting with a hard ceiling (no guessed
//!   fixed delays)
//! - Serialized command execution per session (one command in flight)
//! - Schema-driven record extraction with a centralized status-flag map
//! - Entity operations for address pools, DHCP servers and networks,
//!   PPPoE servers, PPP profiles and secrets, and the system clock
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rostelnet::{RosClient, TelnetConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rostelnet::Error> {
//!     let config = TelnetConfig::new("192.168.88.1")
//!         .with_username("admin")
//!         .with_password("secret");
//!
//!     let client = RosClient::connect(config).await?;
//!
//!     for pool in client.pools().list().await? {
//!         println!(
//!             "{} -> {}",
//!             pool.get("name").unwrap_or(""),
//!             pool.get("ranges").unwrap_or("")
//!         );
//!     }
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod client;
pub mod error;
pub mod parser;
pub mod transport;

// Re-export main types for convenience
pub use channel::CommandChannel;
pub use client::RosClient;
pub use error::Error;
pub use parser::{EntryStatus, FieldKind, Record, Schema};
pub use transport::{PollingPolicy, TelnetConfig, TelnetTransport};
