//! Address pool operations (`/ip pool`).

use std::sync::LazyLock;

use crate::channel::{CommandChannel, check_result};
use crate::error::Result;
use crate::parser::{CompiledSchema, Record, Schema, extract};

static POOL_SCHEMA: LazyLock<CompiledSchema> = LazyLock::new(|| {
    Schema::new()
        .with_quoted("name", "name=")
        .with_bare("ranges", "ranges=")
        .compile()
        .expect("pool schema is valid")
});

/// Handle for `/ip pool` operations.
pub struct AddressPools<'a> {
    channel: &'a CommandChannel,
}

impl<'a> AddressPools<'a> {
    pub(crate) fn new(channel: &'a CommandChannel) -> Self {
        Self { channel }
    }

    /// List the configured address pools (`name` and `ranges` fields).
    pub async fn list(&self) -> Result<Vec<Record>> {
        let out = self.channel.execute("/ip pool print detail").await?;
        extract(&out, &POOL_SCHEMA)
    }

    /// Add an address pool.
    pub async fn add(&self, name: &str, ranges: &str) -> Result<()> {
        let cmd = format!("/ip pool add name={name} ranges={ranges}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Add Pool", &out)
    }

    /// Remove an address pool by row number.
    pub async fn remove(&self, numbers: &str) -> Result<()> {
        let cmd = format!("/ip pool remove numbers={numbers}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Remove Address Pool", &out)
    }

    /// Rename an existing pool.
    pub async fn set_name(&self, numbers: &str, new_name: &str) -> Result<()> {
        let cmd = format!("/ip pool set numbers={numbers} name={new_name}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set Pool Name", &out)
    }

    /// Change an existing pool's address ranges.
    pub async fn set_ranges(&self, numbers: &str, new_ranges: &str) -> Result<()> {
        let cmd = format!("/ip pool set numbers={numbers} ranges={new_ranges}");
        let out = self.channel.execute(&cmd).await?;
        check_result("Set Pool Ranges", &out)
    }
}
