//! Error types for rostelnet.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Main error type for rostelnet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Telnet transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Command channel errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Command execution errors reported by the router
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Record extraction errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Client-level errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Transport layer errors (TCP connection, console handshake).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// A login handshake marker did not appear in time.
    ///
    /// The session is unusable after this error.
    #[error("Handshake marker {expected:?} not seen within {timeout:?}")]
    AuthenticationTimeout { expected: String, timeout: Duration },

    /// A read-until marker did not appear in time.
    ///
    /// Non-fatal: the caller may retry or surface it as a command timeout.
    #[error("Marker not found within {0:?}")]
    ReadTimeout(Duration),

    /// The stream closed unexpectedly during an operation
    #[error("Connection lost")]
    ConnectionLost,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (command issuance, response harvesting).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The harvesting ceiling elapsed before a full quiescence window.
    ///
    /// The command's effect on router state is indeterminate; the channel
    /// never retries on the caller's behalf.
    #[error("Response not quiescent within {0:?}")]
    CommandTimeout(Duration),
}

/// Command result errors (the router echoed its failure marker).
#[derive(Error, Debug)]
pub enum CommandError {
    /// The router rejected the command; the message is extracted verbatim
    /// from the failure marker.
    #[error("{operation} failed: {message}")]
    Failed { operation: String, message: String },
}

/// Record extraction errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A status-flag code did not match any known shape
    #[error("Unknown status flag code: {code:?}")]
    UnknownFlag { code: String },

    /// A schema compiled into an invalid regex
    #[error("Invalid schema pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Client layer errors (entity operations on top of the core).
#[derive(Error, Debug)]
pub enum ClientError {
    /// A name-to-row-number lookup found no matching record
    #[error("No matched {entity} number for {name:?}")]
    NotFound { entity: String, name: String },
}

/// Result type alias using rostelnet's Error.
pub type Result<T> = std::result::Result<T, Error>;
