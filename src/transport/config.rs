//! Telnet connection configuration.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Timing policy for the session and command channel.
///
/// All timing behavior is carried here explicitly rather than in module
/// constants, so it is configurable per connection and testable without
/// global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingPolicy {
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Timeout for each login handshake marker (`Login:`, `Password:`,
    /// the prompt marker).
    pub handshake_timeout: Duration,

    /// Default timeout for `read_until` calls outside the handshake.
    pub read_timeout: Duration,

    /// Idle duration after which no further response bytes are expected.
    pub quiescence: Duration,

    /// Hard ceiling on one command's harvesting loop.
    pub ceiling: Duration,
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            handshake_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(10),
            quiescence: Duration::from_millis(500),
            ceiling: Duration::from_secs(10),
        }
    }
}

/// Telnet console connection configuration.
#[derive(Debug, Clone)]
pub struct TelnetConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// Telnet port (default: 23).
    pub port: u16,

    /// Username for the console login. When `None`, the login handshake is
    /// skipped and only the prompt marker is awaited.
    pub username: Option<String>,

    /// Password for the console login.
    pub password: SecretString,

    /// Prompt marker confirming the console is ready (default: `>`).
    pub prompt: String,

    /// Timing policy for the session.
    pub policy: PollingPolicy,
}

impl TelnetConfig {
    /// Create a configuration for the specified host with defaults.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 23,
            username: None,
            password: SecretString::from(String::new()),
            prompt: ">".to_string(),
            policy: PollingPolicy::default(),
        }
    }

    /// Set the telnet port (default: 23).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the login username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::from(password.into());
        self
    }

    /// Set the prompt marker (default: `>`).
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the timing policy.
    pub fn with_policy(mut self, policy: PollingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
