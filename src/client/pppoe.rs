//! PPPoE server, PPP profile, and PPP secret operations.

use std::sync::LazyLock;

use super::disabled_arg;
use crate::channel::{CommandChannel, check_result};
use crate::error::{ClientError, Result};
use crate::parser::{CompiledSchema, Record, Schema, extract, lookup_number};

static SERVER_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_ordinal()
        .with_status_flag("status")
        .with_quoted("service_name", "service-name=")
        .with_bare("interface", "interface=")
        .with_bare("max_mtu", "max-mtu=")
        .with_bare("max_mru", "max-mru=")
        .with_bare("authentication", "authentication=")
        .with_bare("default_profile", "default-profile=")
        .compile()
        .expect("pppoe server schema is valid")
});

static PROFILE_NAME_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_quoted("name", "name=")
        .compile()
        .expect("profile name schema is valid")
});

static PROFILE_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_quoted("name", "name=")
        .with_bare("local_address", "local-address=")
        .with_bare("remote_address", "remote-address=")
        .with_bare("use_encryption", "use-encryption=")
        .with_bare("dns_server", "dns-server=")
        .compile()
        .expect("profile schema is valid")
});

static SECRET_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_ordinal()
        .with_status_flag("status")
        .with_quoted("name", "name=")
        .with_bare("service", "service=")
        .with_quoted("password", "password=")
        .with_bare("profile", "profile=")
        .compile()
        .expect("ppp secret schema is valid")
});

/// Handle for PPPoE server, PPP profile, and PPP secret operations.
pub struct Pppoe<'a> {
    channel: &'a CommandChannel,
}

impl<'a> Pppoe<'a> {
    pub(crate) fn new(channel: &'a CommandChannel) -> Self {
        Self { channel }
    }

    /// List PPPoE servers (`number`, `status`, `service_name`,
    /// `interface`, `max_mtu`, `max_mru`, `authentication`,
    /// `default_profile`).
    pub async fn servers(&self) -> Result<Vec<Record>> {
        let out = self
            .channel
            .execute("/interface pppoe-server server print detail")
            .await?;
        extract(&out, &SERVER_SCHEMA)
    }

    /// Resolve a PPPoE server's row number from its service name.
    pub async fn server_number(&self, service_name: &str) -> Result<String> {
        let servers = self.servers().await?;
        lookup_number(&servers, "service_name", service_name, "PPPoE Server")
    }

    /// Add a PPPoE server.
    pub async fn add_server(
        &self,
        service_name: &str,
        interface: &str,
        default_profile: &str,
        max_mtu: &str,
        max_mru: &str,
        enabled: bool,
    ) -> Result<()> {
        let disabled = disabled_arg(enabled);
        let cmd = format!(
            "/interface pppoe-server server add service-name={service_name} \
             interface={interface} default-profile={default_profile} \
             max-mtu={max_mtu} max-mru={max_mru} disabled={disabled}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Add PPPoE Server", &out)
    }

    /// Remove a PPPoE server by row number.
    pub async fn remove_server(&self, numbers: &str) -> Result<()> {
        let cmd = format!("/interface pppoe-server server remove numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Remove PPPoE Server", &out)
    }

    /// Enable or disable a PPPoE server.
    pub async fn set_server_enabled(&self, numbers: &str, enabled: bool) -> Result<()> {
        let action = if enabled { "enable" } else { "disable" };
        let cmd = format!("/interface pppoe-server server {action} numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server Status", &out)
    }

    /// Change a PPPoE server's service name.
    pub async fn set_server_name(&self, numbers: &str, service_name: &str) -> Result<()> {
        let cmd = format!(
            "/interface pppoe-server server set numbers={numbers} service-name={service_name}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server Service Name", &out)
    }

    /// Change a PPPoE server's authentication list (e.g. `pap,chap`).
    pub async fn set_server_authentication(
        &self,
        numbers: &str,
        authentication: &str,
    ) -> Result<()> {
        let authentication = authentication.to_lowercase();
        let cmd = format!(
            "/interface pppoe-server server set numbers={numbers} authentication={authentication}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server Authentication", &out)
    }

    /// Change a PPPoE server's max MTU.
    pub async fn set_server_max_mtu(&self, numbers: &str, max_mtu: &str) -> Result<()> {
        let cmd = format!("/interface pppoe-server server set numbers={numbers} max-mtu={max_mtu}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server Max MTU", &out)
    }

    /// Change a PPPoE server's max MRU.
    pub async fn set_server_max_mru(&self, numbers: &str, max_mru: &str) -> Result<()> {
        let cmd = format!("/interface pppoe-server server set numbers={numbers} max-mru={max_mru}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server Max MRU", &out)
    }

    /// Set the DNS server on the profile behind a PPPoE server.
    ///
    /// Resolves the server row's default profile, then updates that
    /// profile. Fails with `NotFound` when the row number does not match
    /// any server.
    pub async fn set_server_dns(&self, numbers: &str, dns_server: &str) -> Result<()> {
        let servers = self.servers().await?;
        let profile = servers
            .iter()
            .find(|s| s.number() == Some(numbers))
            .and_then(|s| s.get("default_profile"))
            .ok_or_else(|| ClientError::NotFound {
                entity: "PPPoE Server Profile".to_string(),
                name: numbers.to_string(),
            })?
            .to_string();

        let cmd = format!("/ppp profile set numbers={profile} dns-server={dns_server}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPPoE Server DNS", &out)
    }

    /// List PPP profile names.
    pub async fn profile_names(&self) -> Result<Vec<String>> {
        let out = self.channel.execute("/ppp profile print detail").await?;
        let records = extract(&out, &PROFILE_NAME_SCHEMA)?;
        Ok(records
            .iter()
            .filter_map(|r| r.get("name"))
            .map(str::to_string)
            .collect())
    }

    /// List PPP profiles (`name`, `local_address`, `remote_address`,
    /// `use_encryption`, `dns_server`).
    pub async fn profiles(&self) -> Result<Vec<Record>> {
        let out = self
            .channel
            .execute("/ppp profile print without-paging")
            .await?;
        extract(&out, &PROFILE_SCHEMA)
    }

    /// List PPP secrets (`number`, `status`, `name`, `service`,
    /// `password`, `profile`).
    pub async fn secrets(&self) -> Result<Vec<Record>> {
        let out = self.channel.execute("/ppp secret print detail").await?;
        extract(&out, &SECRET_SCHEMA)
    }

    /// Resolve a PPP secret's row number from its name.
    pub async fn secret_number(&self, secret_name: &str) -> Result<String> {
        let secrets = self.secrets().await?;
        lookup_number(&secrets, "name", secret_name, "PPP Secret")
    }

    /// Add a PPP secret (dial-in account).
    pub async fn add_secret(
        &self,
        secret_name: &str,
        service_name: &str,
        profile_name: &str,
        password: &str,
        enabled: bool,
    ) -> Result<()> {
        let disabled = disabled_arg(enabled);
        let cmd = format!(
            "/ppp secret add name={secret_name} service={service_name} \
             profile={profile_name} password={password} disabled={disabled}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Add PPPoE Server Secret", &out)
    }

    /// Remove a PPP secret by row number.
    pub async fn remove_secret(&self, numbers: &str) -> Result<()> {
        let cmd = format!("/ppp secret remove numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Remove PPPoE Server Secret", &out)
    }

    /// Rename a PPP secret.
    pub async fn set_secret_name(&self, numbers: &str, new_name: &str) -> Result<()> {
        let cmd = format!("/ppp secret set numbers={numbers} name={new_name}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPP Secret Name", &out)
    }

    /// Change a PPP secret's password.
    pub async fn set_secret_password(&self, numbers: &str, new_password: &str) -> Result<()> {
        let cmd = format!("/ppp secret set numbers={numbers} password={new_password}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPP Secret Password", &out)
    }

    /// Enable or disable a PPP secret.
    pub async fn set_secret_enabled(&self, numbers: &str, enabled: bool) -> Result<()> {
        let disabled = disabled_arg(enabled);
        let cmd = format!("/ppp secret set numbers={numbers} disabled={disabled}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPP Secret Status", &out)
    }

    /// Move a PPP secret to a different profile.
    pub async fn set_secret_profile(&self, numbers: &str, profile_name: &str) -> Result<()> {
        let cmd = format!("/ppp secret set numbers={numbers} profile={profile_name}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set PPP Secret Profile", &out)
    }
}
