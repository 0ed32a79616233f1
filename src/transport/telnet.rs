//! Telnet transport over a raw TCP stream.
//!
//! RouterOS consoles speak plain text on port 23 with no option
//! negotiation, so the transport is a thin line-oriented layer over any
//! async byte stream: CR-terminated writes, marker-based reads with
//! timeouts, and the login handshake.

use std::io;
use std::time::Duration;

use bytes::BytesMut;
use log::{debug, trace};
use secrecy::ExposeSecret;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::config::TelnetConfig;
use crate::channel::CaptureBuffer;
use crate::error::{Error, Result, TransportError};

/// Object-safe alias for the underlying byte stream.
///
/// `connect` uses a [`TcpStream`]; tests script the peer with
/// `tokio::io::duplex`.
pub trait ConsoleStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> ConsoleStream for T {}

/// A connected console session.
///
/// Owns the stream and an accumulation buffer: all reads append to the
/// buffer, and callers drain it through marker matches. Exactly one
/// command may be in flight at a time; that invariant is enforced one
/// layer up by [`CommandChannel`](crate::channel::CommandChannel).
pub struct TelnetTransport {
    stream: Box<dyn ConsoleStream>,

    /// Bytes read from the stream but not yet consumed by a caller.
    pending: CaptureBuffer,

    config: TelnetConfig,

    authenticated: bool,
}

impl TelnetTransport {
    /// Connect to the console and perform the login handshake.
    pub async fn connect(config: TelnetConfig) -> Result<Self> {
        let addr = config.socket_addr();
        let stream = tokio::time::timeout(config.policy.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| TransportError::ConnectionFailed {
                host: config.host.clone(),
                port: config.port,
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            })?
            .map_err(|e| TransportError::ConnectionFailed {
                host: config.host.clone(),
                port: config.port,
                source: e,
            })?;

        let mut transport = Self::from_stream(stream, config);
        transport.login().await?;
        Ok(transport)
    }

    /// Wrap an already-established stream without connecting.
    ///
    /// The login handshake is not performed; call [`login`](Self::login)
    /// if the peer expects one.
    pub fn from_stream(stream: impl ConsoleStream + 'static, config: TelnetConfig) -> Self {
        Self {
            stream: Box::new(stream),
            pending: CaptureBuffer::new(),
            config,
            authenticated: false,
        }
    }

    /// Drive the console login handshake.
    ///
    /// When a username is configured: wait for the literal `Login:` marker,
    /// send the username, wait for `Password:`, send the password. In all
    /// cases, wait for the prompt marker to confirm the console is ready.
    pub async fn login(&mut self) -> Result<()> {
        let handshake = self.config.policy.handshake_timeout;

        if let Some(username) = self.config.username.clone() {
            self.expect("Login:", handshake).await?;
            self.write_line(&username).await?;
            self.expect("Password:", handshake).await?;
            let password = self.config.password.expose_secret().to_string();
            self.write_line(&password).await?;
        }

        let prompt = self.config.prompt.clone();
        self.expect(&prompt, handshake).await?;

        self.authenticated = true;
        debug!("console session established with {}", self.config.host);
        Ok(())
    }

    /// Send one command line, terminated by a single carriage return.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        trace!("write {} bytes + CR", line.len());
        self.stream
            .write_all(line.as_bytes())
            .await
            .map_err(TransportError::Io)?;
        self.stream.write_all(b"\r").await.map_err(TransportError::Io)?;
        self.stream.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    /// Read until the literal `marker` appears, bounded by the policy's
    /// default read timeout.
    pub async fn read_until(&mut self, marker: &[u8]) -> Result<Vec<u8>> {
        let timeout = self.config.policy.read_timeout;
        self.read_until_within(marker, timeout).await
    }

    /// Read until the literal `marker` appears in the accumulated stream.
    ///
    /// Returns everything read up to and including the marker; bytes past
    /// the marker stay pending for subsequent reads. Fails with
    /// [`TransportError::ReadTimeout`] if the marker does not appear before
    /// `timeout` elapses (non-fatal: the session remains usable).
    pub async fn read_until_within(&mut self, marker: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if let Some(end) = self.pending.find_end(marker) {
                return Ok(self.pending.drain_to(end));
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(TransportError::ReadTimeout(timeout).into());
            }

            let mut buf = [0u8; 4096];
            match tokio::time::timeout(deadline - now, self.stream.read(&mut buf)).await {
                Ok(Ok(0)) => return Err(TransportError::ConnectionLost.into()),
                Ok(Ok(n)) => self.pending.extend(&buf[..n]),
                Ok(Err(e)) => return Err(TransportError::Io(e).into()),
                Err(_) => return Err(TransportError::ReadTimeout(timeout).into()),
            }
        }
    }

    /// Read the next available chunk of bytes.
    ///
    /// Drains any pending bytes first; otherwise blocks until the peer
    /// sends data. EOF is surfaced as [`TransportError::ConnectionLost`].
    pub async fn read_chunk(&mut self) -> Result<BytesMut> {
        if !self.pending.is_empty() {
            return Ok(self.pending.take());
        }

        let mut buf = [0u8; 4096];
        let n = self
            .stream
            .read(&mut buf)
            .await
            .map_err(TransportError::Io)?;
        if n == 0 {
            return Err(TransportError::ConnectionLost.into());
        }

        let mut chunk = BytesMut::with_capacity(n);
        chunk.extend_from_slice(&buf[..n]);
        Ok(chunk)
    }

    /// Take all pending bytes without touching the stream.
    pub fn take_pending(&mut self) -> BytesMut {
        self.pending.take()
    }

    /// Whether the login handshake completed.
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// The session's timing policy.
    pub fn policy(&self) -> &super::config::PollingPolicy {
        &self.config.policy
    }

    /// Shut down the stream.
    pub async fn close(&mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(TransportError::Io)?;
        debug!("console session with {} closed", self.config.host);
        Ok(())
    }

    /// Wait for a handshake marker, mapping a timeout to the fatal
    /// authentication error carrying the marker that never appeared.
    async fn expect(&mut self, marker: &str, timeout: Duration) -> Result<Vec<u8>> {
        self.read_until_within(marker.as_bytes(), timeout)
            .await
            .map_err(|e| match e {
                Error::Transport(TransportError::ReadTimeout(t)) => {
                    TransportError::AuthenticationTimeout {
                        expected: marker.to_string(),
                        timeout: t,
                    }
                    .into()
                }
                other => other,
            })
    }
}

impl std::fmt::Debug for TelnetTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetTransport")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("authenticated", &self.authenticated)
            .field("pending", &self.pending.len())
            .finish()
    }
}
