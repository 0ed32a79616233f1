//! System clock operations (`/system clock`).

use crate::channel::{CommandChannel, check_result};
use crate::error::Result;

/// Handle for `/system clock` operations.
pub struct SystemClock<'a> {
    channel: &'a CommandChannel,
}

impl<'a> SystemClock<'a> {
    pub(crate) fn new(channel: &'a CommandChannel) -> Self {
        Self { channel }
    }

    /// Set the router's date, time, and time zone.
    ///
    /// `date` is `mon/DD/YYYY` (e.g. `Jan/01/2018`), `time` is
    /// `HH:MM:SS`. Autodetection is switched off so the explicit zone
    /// wins.
    pub async fn set(&self, date: &str, time: &str, time_zone: &str) -> Result<()> {
        let cmd = format!(
            "/system clock set date={date} time={time} \
             time-zone-autodetect=no time-zone-name={time_zone}"
        );
        let out = self.channel.execute(&cmd).await?;
        check_result("Set NTP Clock", &out)
    }
}
