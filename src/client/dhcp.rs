//! DHCP server, lease, and network operations (`/ip dhcp-server`).

use std::sync::LazyLock;

use super::disabled_arg;
use crate::channel::{CommandChannel, check_result};
use crate::error::Result;
use crate::parser::{CompiledSchema, Record, Schema, extract, lookup_number};

static LEASE_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_bare("address", "address=")
        .with_bare("mac_address", "mac-address=")
        .with_bare("server", "server=")
        .with_quoted("host_name", "host-name=")
        .compile()
        .expect("lease schema is valid")
});

static NETWORK_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_ordinal()
        .with_bare("address", "address=")
        .with_bare("gateway", "gateway=")
        .with_bare("netmask", "netmask=")
        .with_bare("dns_server", "dns-server=")
        .compile()
        .expect("network schema is valid")
});

/// Handle for DHCP server, lease, and network operations.
pub struct Dhcp<'a> {
    channel: &'a CommandChannel,
}

impl<'a> Dhcp<'a> {
    pub(crate) fn new(channel: &'a CommandChannel) -> Self {
        Self { channel }
    }

    /// Add a DHCP server bound to an interface and address pool.
    pub async fn add_server(
        &self,
        name: &str,
        interface: &str,
        address_pool: &str,
        lease_time: &str,
        enabled: bool,
    ) -> Result<()> {
        let disabled = disabled_arg(enabled);
        let cmd = format!(
            "/ip dhcp-server add name={name} interface={interface} \
             address-pool={address_pool} lease-time={lease_time} disabled={disabled}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Add DHCP Server", &out)
    }

    /// Remove a DHCP server by row number.
    pub async fn remove_server(&self, numbers: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server remove numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Remove DHCP Server", &out)
    }

    /// Enable or disable a DHCP server.
    pub async fn set_server_enabled(&self, numbers: &str, enabled: bool) -> Result<()> {
        let action = if enabled { "enable" } else { "disable" };
        let cmd = format!("/ip dhcp-server {action} numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Status", &out)
    }

    /// Point a DHCP server at a different address pool.
    pub async fn set_server_address_pool(&self, numbers: &str, address_pool: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server set numbers={numbers} address-pool={address_pool}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Address Pool", &out)
    }

    /// Change a DHCP server's lease time (e.g. `00:10:00`).
    pub async fn set_server_lease_time(&self, numbers: &str, lease_time: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server set numbers={numbers} lease-time={lease_time}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Lease Time", &out)
    }

    /// List issued leases (`address`, `mac_address`, `server`, `host_name`).
    pub async fn leases(&self) -> Result<Vec<Record>> {
        let out = self
            .channel
            .execute("/ip dhcp-server lease print detail")
            .await?;
        extract(&out, &LEASE_SCHEMA)
    }

    /// List DHCP networks (`number`, `address`, `gateway`, `netmask`,
    /// `dns_server`).
    pub async fn networks(&self) -> Result<Vec<Record>> {
        let out = self
            .channel
            .execute("/ip dhcp-server network print detail")
            .await?;
        extract(&out, &NETWORK_SCHEMA)
    }

    /// Add a DHCP network.
    pub async fn add_network(
        &self,
        address: &str,
        gateway: &str,
        netmask: &str,
        dns_server: &str,
    ) -> Result<()> {
        let cmd = format!(
            "/ip dhcp-server network add address={address} gateway={gateway} \
             netmask={netmask} dns-server={dns_server}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Add DHCP Server Network", &out)
    }

    /// Resolve a network's row number from its address (e.g. `10.0.0.0/8`).
    pub async fn network_number(&self, address: &str) -> Result<String> {
        let networks = self.networks().await?;
        lookup_number(&networks, "address", address, "DHCP Server Network")
    }

    /// Remove a DHCP network by row number.
    pub async fn remove_network(&self, numbers: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server network remove numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Remove DHCP Server Network", &out)
    }

    /// Rewrite all of a DHCP network's parameters at once.
    pub async fn set_network(
        &self,
        numbers: &str,
        address: &str,
        gateway: &str,
        netmask: &str,
        dns_server: &str,
    ) -> Result<()> {
        let cmd = format!(
            "/ip dhcp-server network set numbers={numbers} address={address} \
             gateway={gateway} netmask={netmask} dns-server={dns_server}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Network", &out)
    }

    /// Change a DHCP network's address.
    pub async fn set_network_address(&self, numbers: &str, address: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server network set numbers={numbers} address={address}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Network Address", &out)
    }

    /// Change a DHCP network's gateway.
    pub async fn set_network_gateway(&self, numbers: &str, gateway: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server network set numbers={numbers} gateway={gateway}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Network Gateway", &out)
    }

    /// Change a DHCP network's netmask.
    pub async fn set_network_netmask(&self, numbers: &str, netmask: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server network set numbers={numbers} netmask={netmask}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Network Netmask", &out)
    }

    /// Change a DHCP network's DNS server.
    pub async fn set_network_dns(&self, numbers: &str, dns_server: &str) -> Result<()> {
        let cmd = format!("/ip dhcp-server network set numbers={numbers} dns-server={dns_server}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set DHCP Server Network DNS Server", &out)
    }
}
