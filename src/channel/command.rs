//! Exclusive command channel with quiescence-based response harvesting.
//!
//! The console has no per-command correlation id and no end-of-response
//! delimiter for most commands, so the channel serializes commands behind
//! a mutex and treats "no new bytes for a quiescence window" as response
//! completion, bounded by a hard ceiling.

use std::sync::Arc;

use bytes::BytesMut;
use log::{debug, trace};
use tokio::sync::Mutex;

use crate::channel::sanitize::sanitize;
use crate::error::{ChannelError, Result};
use crate::transport::{PollingPolicy, TelnetTransport};

/// Serialized command execution over one console session.
///
/// Cloning is cheap and shares the session: concurrent callers block on
/// the execution lock until the in-flight command's harvesting completes.
#[derive(Clone)]
pub struct CommandChannel {
    transport: Arc<Mutex<TelnetTransport>>,
    policy: PollingPolicy,
}

impl CommandChannel {
    /// Wrap a connected transport.
    pub fn new(transport: TelnetTransport) -> Self {
        let policy = transport.policy().clone();
        Self {
            transport: Arc::new(Mutex::new(transport)),
            policy,
        }
    }

    /// Execute one command and return its sanitized response text.
    ///
    /// Acquires the session's exclusive lock, writes the command, then
    /// harvests: every read restarts the quiescence window, and the loop
    /// ends normally once a full window passes with no new bytes. If the
    /// ceiling elapses first the command fails with
    /// [`ChannelError::CommandTimeout`]; its effect on router state is
    /// indeterminate and is never retried here. The lock is released on
    /// every exit path.
    pub async fn execute(&self, command: &str) -> Result<String> {
        let mut transport = self.transport.lock().await;
        debug!("execute: {command}");

        transport.write_line(command).await?;
        let raw = self.harvest(&mut transport).await?;

        trace!("harvested {} bytes", raw.len());
        Ok(sanitize(&String::from_utf8_lossy(&raw)))
    }

    /// The channel's timing policy.
    pub fn policy(&self) -> &PollingPolicy {
        &self.policy
    }

    /// Close the underlying session.
    pub async fn close(&self) -> Result<()> {
        self.transport.lock().await.close().await
    }

    async fn harvest(&self, transport: &mut TelnetTransport) -> Result<BytesMut> {
        // Leftover bytes (e.g. prompt debris from the previous command)
        // belong to this capture window.
        let mut captured = transport.take_pending();
        let deadline = tokio::time::Instant::now() + self.policy.ceiling;

        loop {
            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(ChannelError::CommandTimeout(self.policy.ceiling).into());
            }

            let remaining = deadline - now;
            let wait = self.policy.quiescence.min(remaining);

            match tokio::time::timeout(wait, transport.read_chunk()).await {
                Ok(Ok(chunk)) => captured.extend_from_slice(&chunk),
                Ok(Err(e)) => return Err(e),
                // A full idle window: the response is complete (possibly
                // empty). A shorter wait means the ceiling cut it off.
                Err(_) if wait >= self.policy.quiescence => return Ok(captured),
                Err(_) => return Err(ChannelError::CommandTimeout(self.policy.ceiling).into()),
            }
        }
    }
}

impl std::fmt::Debug for CommandChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandChannel")
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

    use super::*;
    use crate::error::Error;
    use crate::transport::TelnetConfig;

    fn channel_over(
        stream: DuplexStream,
        quiescence: Duration,
        ceiling: Duration,
    ) -> CommandChannel {
        let config = TelnetConfig::new("router.test").with_policy(PollingPolicy {
            quiescence,
            ceiling,
            ..PollingPolicy::default()
        });
        CommandChannel::new(TelnetTransport::from_stream(stream, config))
    }

    /// Read from the peer side until a CR-terminated command line arrives.
    async fn read_command(peer: &mut DuplexStream) -> String {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            peer.read_exact(&mut byte).await.unwrap();
            if byte[0] == b'\r' {
                return String::from_utf8(line).unwrap();
            }
            line.push(byte[0]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_harvest_completes_at_quiescence() {
        let (local, _peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(500), Duration::from_secs(10));

        let start = tokio::time::Instant::now();
        let out = channel.execute("/ip pool print detail").await.unwrap();

        assert!(out.is_empty());
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_peer_hits_ceiling_when_shorter_than_quiescence() {
        let (local, _peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(500), Duration::from_millis(200));

        let err = channel.execute("/ip pool print detail").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Channel(ChannelError::CommandTimeout(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trickling_peer_hits_ceiling() {
        let (local, mut peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(500), Duration::from_secs(1));

        let server = tokio::spawn(async move {
            let _ = read_command(&mut peer).await;
            // Never idle long enough for quiescence, so the ceiling wins.
            for _ in 0..10 {
                if peer.write_all(b"x").await.is_err() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
        });

        let err = channel.execute("/ppp secret print detail").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Channel(ChannelError::CommandTimeout(_))
        ));
        server.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_harvest_collects_response_and_sanitizes() {
        let (local, mut peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(500), Duration::from_secs(10));

        let server = tokio::spawn(async move {
            let cmd = read_command(&mut peer).await;
            assert_eq!(cmd, "/ip pool print detail");
            peer.write_all(b"\x1b[32m0 name=\"pppoe\"\x1b[m ranges=10.0.0.2-10.0.0.50 \r\n")
                .await
                .unwrap();
            // Keep the peer open while the channel waits out quiescence.
            let mut buf = [0u8; 1];
            let _ = peer.read(&mut buf).await;
        });

        let out = channel.execute("/ip pool print detail").await.unwrap();
        assert!(out.contains("0 name=\"pppoe\" ranges=10.0.0.2-10.0.0.50"));
        assert!(!out.contains('\x1b'));
        drop(channel);
        server.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_execute_blocks_until_lock_release() {
        let (local, _peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(100), Duration::from_secs(10));

        // Hold the execution lock as an in-flight command would.
        let guard = channel.transport.lock().await;

        let blocked = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.execute("/ip pool print detail").await })
        };

        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(!blocked.is_finished());

        drop(guard);
        let out = blocked.await.unwrap().unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_executes_never_interleave_harvests() {
        let (local, mut peer) = tokio::io::duplex(1024);
        let channel = channel_over(local, Duration::from_millis(500), Duration::from_secs(10));

        let server = tokio::spawn(async move {
            for _ in 0..2 {
                let cmd = read_command(&mut peer).await;
                let reply: &[u8] = if cmd.contains("pool") {
                    b"ALPHA\r\n"
                } else {
                    b"BETA\r\n"
                };
                peer.write_all(reply).await.unwrap();
            }
            let mut buf = [0u8; 1];
            let _ = peer.read(&mut buf).await;
        });

        let first = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.execute("/ip pool print detail").await })
        };
        let second = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.execute("/ppp secret print detail").await })
        };

        let pool_out = first.await.unwrap().unwrap();
        let secret_out = second.await.unwrap().unwrap();

        assert!(pool_out.contains("ALPHA"));
        assert!(!pool_out.contains("BETA"));
        assert!(secret_out.contains("BETA"));
        assert!(!secret_out.contains("ALPHA"));
        drop(channel);
        server.await.unwrap();
    }
}
