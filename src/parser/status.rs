//! Status-flag codes for console table rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Semantic state of a console table row, decoded from the short flag
/// prefix the router prints before the row's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    /// No flag code.
    Enabled,
    /// `X`
    Disabled,
    /// `I`
    Invalid,
    /// `XI`
    DisabledInvalid,
}

impl EntryStatus {
    /// Decode a flag code. The mapping is total over `""`, `"X"`, `"I"`
    /// and `"XI"`; any other code is an error rather than a silent
    /// pass-through.
    pub fn from_flags(code: &str) -> Result<Self, ParseError> {
        match code {
            "" => Ok(Self::Enabled),
            "X" => Ok(Self::Disabled),
            "I" => Ok(Self::Invalid),
            "XI" => Ok(Self::DisabledInvalid),
            other => Err(ParseError::UnknownFlag {
                code: other.to_string(),
            }),
        }
    }

    /// The record-field value for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Invalid => "invalid",
            Self::DisabledInvalid => "disabled and invalid",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
