//! High-level RouterOS client.
//!
//! [`RosClient`] owns one [`CommandChannel`] and hands out lightweight
//! per-entity handles that borrow it. Entity operations format one
//! command string, execute it through the channel, and either validate
//! the result (mutations) or extract records (reads); they hold no state
//! of their own.

mod clock;
mod dhcp;
mod pool;
mod pppoe;

pub use clock::SystemClock;
pub use dhcp::Dhcp;
pub use pool::AddressPools;
pub use pppoe::Pppoe;

use crate::channel::CommandChannel;
use crate::error::Result;
use crate::transport::{TelnetConfig, TelnetTransport};

/// Client for a MikroTik RouterOS console session.
pub struct RosClient {
    channel: CommandChannel,
}

impl RosClient {
    /// Connect to the router console and log in.
    pub async fn connect(config: TelnetConfig) -> Result<Self> {
        let transport = TelnetTransport::connect(config).await?;
        Ok(Self::new(CommandChannel::new(transport)))
    }

    /// Build a client over an existing channel.
    pub fn new(channel: CommandChannel) -> Self {
        Self { channel }
    }

    /// Address pool operations (`/ip pool`).
    pub fn pools(&self) -> AddressPools<'_> {
        AddressPools::new(&self.channel)
    }

    /// DHCP server, lease, and network operations (`/ip dhcp-server`).
    pub fn dhcp(&self) -> Dhcp<'_> {
        Dhcp::new(&self.channel)
    }

    /// PPPoE server, PPP profile, and PPP secret operations.
    pub fn pppoe(&self) -> Pppoe<'_> {
        Pppoe::new(&self.channel)
    }

    /// System clock operations (`/system clock`).
    pub fn clock(&self) -> SystemClock<'_> {
        SystemClock::new(&self.channel)
    }

    /// The underlying command channel.
    pub fn channel(&self) -> &CommandChannel {
        &self.channel
    }

    /// Close the console session.
    pub async fn close(&self) -> Result<()> {
        self.channel.close().await
    }
}

/// Map an `enabled` argument onto the console's `disabled=` parameter.
pub(crate) fn disabled_arg(enabled: bool) -> &'static str {
    if enabled { "no" } else { "yes" }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

    use super::*;
    use crate::error::{ClientError, CommandError, Error};
    use crate::transport::PollingPolicy;

    fn test_config() -> TelnetConfig {
        TelnetConfig::new("router.test")
            .with_username("admin")
            .with_password("secret")
            .with_policy(PollingPolicy {
                quiescence: Duration::from_millis(200),
                ceiling: Duration::from_secs(5),
                ..PollingPolicy::default()
            })
    }

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

    /// Scripted router: login handshake, then one (command, response) turn
    /// per entry.
    async fn run_router(mut peer: DuplexStream, turns: Vec<(&'static str, &'static str)>) {
        peer.write_all(b"Login: ").await.unwrap();
        assert_eq!(read_command(&mut peer).await, "admin");
        peer.write_all(b"Password: ").await.unwrap();
        assert_eq!(read_command(&mut peer).await, "secret");
        peer.write_all(b"\r\n[admin@MikroTik] > ").await.unwrap();

        for (expected, response) in turns {
            let cmd = read_command(&mut peer).await;
            assert_eq!(cmd, expected);
            peer.write_all(response.as_bytes()).await.unwrap();
        }

        // Hold the stream open while the last harvest waits out quiescence.
        let mut buf = [0u8; 1];
        let _ = peer.read(&mut buf).await;
    }

    async fn connected_client(turns: Vec<(&'static str, &'static str)>) -> (RosClient, tokio::task::JoinHandle<()>) {
        let (local, peer) = tokio::io::duplex(4096);
        let server = tokio::spawn(run_router(peer, turns));

        let mut transport = TelnetTransport::from_stream(local, test_config());
        transport.login().await.unwrap();
        assert!(transport.authenticated());

        (RosClient::new(CommandChannel::new(transport)), server)
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_pool_listing() {
        let (client, server) = connected_client(vec![(
            "/ip pool print detail",
            "/ip pool print detail\r\n\
             0 name=\"pppoe\" ranges=192.168.100.201-192.168.100.250 \r\n\
             1 name=\"static\" ranges=192.168.2.1-192.168.2.100 \r\n\
             [admin@MikroTik] > ",
        )])
        .await;

        let pools = client.pools().list().await.unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].get("name"), Some("pppoe"));
        assert_eq!(pools[1].get("ranges"), Some("192.168.2.1-192.168.2.100"));

        drop(client);
        server.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_add_pool_success_and_failure() {
        let (client, server) = connected_client(vec![
            (
                "/ip pool add name=lan ranges=10.0.0.2-10.0.0.50",
                "\r\n[admin@MikroTik] > ",
            ),
            (
                "/ip pool remove numbers=9",
                "\r\n\rno such item\n\r[admin@MikroTik] > ",
            ),
        ])
        .await;

        client.pools().add("lan", "10.0.0.2-10.0.0.50").await.unwrap();

        let err = client.pools().remove("9").await.unwrap_err();
        match err {
            Error::Command(CommandError::Failed { operation, message }) => {
                assert_eq!(operation, "Remove Address Pool");
                assert_eq!(message, "no such item");
            }
            other => panic!("expected CommandError::Failed, got {other:?}"),
        }

        drop(client);
        server.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_secret_number_lookup_miss() {
        let (client, server) = connected_client(vec![(
            "/ppp secret print detail",
            "/ppp secret print detail\r\n[admin@MikroTik] > ",
        )])
        .await;

        let err = client.pppoe().secret_number("ghost").await.unwrap_err();
        assert!(matches!(err, Error::Client(ClientError::NotFound { .. })));

        drop(client);
        server.await.unwrap();
    }

    #[test]
    fn test_disabled_arg_mapping() {
        assert_eq!(disabled_arg(true), "no");
        assert_eq!(disabled_arg(false), "yes");
    }
}
