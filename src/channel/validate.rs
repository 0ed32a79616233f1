//! Failure-marker validation for mutating commands.

use std::sync::LazyLock;

use log::info;
use regex::Regex;

use crate::error::{CommandError, Result};

/// The console echoes a rejected command's reason as a line wrapped in
/// `\r\n\r ... \n\r`. One marker per command at most; only the first is
/// taken when the capture happens to contain several.
static FAILURE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\r\n\r(.*)\n\r").expect("failure marker pattern is valid"));

/// Inspect a sanitized response for the router's failure marker.
///
/// Returns [`CommandError::Failed`] carrying `operation` and the message
/// extracted verbatim from the marker, or logs success and returns `Ok`.
pub fn check_result(operation: &str, text: &str) -> Result<()> {
    if let Some(caps) = FAILURE_MARKER.captures(text) {
        let message = caps[1].to_string();
        return Err(CommandError::Failed {
            operation: operation.to_string(),
            message,
        }
        .into());
    }

    info!("{operation} succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_failure_marker_raises_with_message() {
        let fixture = "/ip pool remove numbers=9\r\n\rno such item\n\r[admin@MikroTik] > ";
        let err = check_result("Add Pool", fixture).unwrap_err();
        match err {
            Error::Command(CommandError::Failed { operation, message }) => {
                assert_eq!(operation, "Add Pool");
                assert_eq!(message, "no such item");
            }
            other => panic!("expected CommandError::Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_response_is_ok() {
        let fixture = "/ip pool add name=lan ranges=10.0.0.2-10.0.0.50\r\n[admin@MikroTik] > ";
        assert!(check_result("Add Pool", fixture).is_ok());
    }

    #[test]
    fn test_first_marker_wins() {
        let fixture = "\r\n\rfirst error\n\rmore output\r\n\rsecond error\n\r";
        let err = check_result("Set Pool Name", fixture).unwrap_err();
        match err {
            Error::Command(CommandError::Failed { message, .. }) => {
                assert_eq!(message, "first error");
            }
            other => panic!("expected CommandError::Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_response_is_ok() {
        assert!(check_result("Remove Address Pool", "").is_ok());
    }
}
