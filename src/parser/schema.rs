//! Declarative field schemas for record extraction.
//!
//! A [`Schema`] names each field of one record row and the shape its
//! value takes on the console; [`Schema::compile`] turns it into a single
//! regex covering the whole row (which may span a multi-line block, since
//! `print detail` wraps long rows). Schemas are plain values and
//! serde-compatible for loading from definition files.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::record::NUMBER_FIELD;
use crate::error::ParseError;

/// The shape one field's value takes in console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Value delimited by double quotes; quotes stripped.
    Quoted,
    /// Value runs until the next whitespace.
    Bare,
    /// Short prefix code mapped to a semantic state (see
    /// [`EntryStatus`](super::EntryStatus)).
    StatusFlag,
    /// The leading row number the router assigns; usable as a later
    /// `numbers=` argument.
    Ordinal,
}

/// One field of a record row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name in the extracted [`Record`](super::Record).
    pub name: String,

    /// Value shape.
    pub kind: FieldKind,

    /// Literal anchor preceding the value (e.g. `ranges=`). Anchors match
    /// anywhere in the row block, so order fields the way the console
    /// prints them.
    pub key: Option<String>,

    /// Whether the field may be absent (extracted as an empty string).
    pub optional: bool,
}

impl FieldSpec {
    fn pattern(&self, gap: &str) -> String {
        let key = self
            .key
            .as_deref()
            .map(regex::escape)
            .unwrap_or_default();
        // The flag column captures any uppercase run; decoding rejects
        // unknown codes instead of the pattern scanning past them.
        let body = match self.kind {
            FieldKind::Quoted => format!("{key}\"([^\"]*)\""),
            FieldKind::Bare => format!("{key}(\\S+)"),
            FieldKind::StatusFlag => "[ ]+([A-Z]*)[ ]".to_string(),
            FieldKind::Ordinal => "^[ ]*([0-9]+)".to_string(),
        };
        // The gap to the previous field stays inside the optional group:
        // left outside, a zero-width gap satisfies the pattern with the
        // group skipped and a present value extracts as absent.
        if self.optional {
            format!("(?:{gap}{body})?")
        } else {
            format!("{gap}{body}")
        }
    }
}

/// Ordered field list describing one entity's record row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the leading ordinal-index field, named
    /// [`NUMBER_FIELD`](super::record::NUMBER_FIELD).
    pub fn with_ordinal(self) -> Self {
        self.push(NUMBER_FIELD, FieldKind::Ordinal, None)
    }

    /// Add a status-flag field.
    pub fn with_status_flag(self, name: impl Into<String>) -> Self {
        self.push(name, FieldKind::StatusFlag, None)
    }

    /// Add a quoted-string field behind a literal key anchor.
    pub fn with_quoted(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.push(name, FieldKind::Quoted, Some(key.into()))
    }

    /// Add a bare-token field behind a literal key anchor.
    pub fn with_bare(self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.push(name, FieldKind::Bare, Some(key.into()))
    }

    /// Mark the most recently added field optional.
    pub fn optional(mut self) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.optional = true;
        }
        self
    }

    /// The declared fields in order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Compile the schema into a single record-row regex.
    ///
    /// Fields are joined by lazy any-character gaps, so a row may span
    /// multiple console lines between one field and the next.
    pub fn compile(self) -> Result<CompiledSchema, ParseError> {
        const GAP: &str = "(?s:.*?)";
        let joined: String = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| field.pattern(if i == 0 { "" } else { GAP }))
            .collect();
        let regex = Regex::new(&format!("(?m){joined}"))?;
        Ok(CompiledSchema {
            fields: self.fields,
            regex,
        })
    }

    fn push(mut self, name: impl Into<String>, kind: FieldKind, key: Option<String>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            key,
            optional: false,
        });
        self
    }
}

/// A schema compiled to its record-row regex.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    fields: Vec<FieldSpec>,
    regex: Regex,
}

impl CompiledSchema {
    /// The declared fields in order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The compiled record-row regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_pool_row() {
        let schema = Schema::new()
            .with_quoted("name", "name=")
            .with_bare("ranges", "ranges=")
            .compile()
            .unwrap();

        let caps = schema
            .regex()
            .captures("name=\"pppoe\" ranges=192.168.100.201-192.168.100.250 ")
            .unwrap();
        assert_eq!(&caps[1], "pppoe");
        assert_eq!(&caps[2], "192.168.100.201-192.168.100.250");
    }

    #[test]
    fn test_ordinal_and_blank_flag_column() {
        let schema = Schema::new()
            .with_ordinal()
            .with_status_flag("status")
            .with_quoted("name", "name=")
            .compile()
            .unwrap();

        // Enabled rows print a blank flags column.
        let caps = schema.regex().captures(" 0   name=\"user1\"").unwrap();
        assert_eq!(&caps[1], "0");
        assert_eq!(&caps[2], "");
        assert_eq!(&caps[3], "user1");

        let caps = schema.regex().captures(" 1 X name=\"user2\"").unwrap();
        assert_eq!(&caps[1], "1");
        assert_eq!(&caps[2], "X");
        assert_eq!(&caps[3], "user2");
    }

    #[test]
    fn test_row_spans_multiline_block() {
        let schema = Schema::new()
            .with_bare("address", "address=")
            .with_bare("dns", "dns-server=")
            .compile()
            .unwrap();

        let block = "0 address=10.0.0.0/8 gateway=10.0.0.1\r\n   netmask=255.0.0.0 dns-server=8.8.8.8 \r\n";
        let caps = schema.regex().captures(block).unwrap();
        assert_eq!(&caps[1], "10.0.0.0/8");
        assert_eq!(&caps[2], "8.8.8.8");
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = Schema::new()
            .with_bare("address", "address=")
            .with_quoted("comment", "comment=")
            .optional()
            .compile()
            .unwrap();

        let caps = schema.regex().captures("address=10.0.0.1/8 ").unwrap();
        assert_eq!(&caps[1], "10.0.0.1/8");
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_optional_field_captured_when_present() {
        let schema = Schema::new()
            .with_bare("address", "address=")
            .with_quoted("comment", "comment=")
            .optional()
            .compile()
            .unwrap();

        let caps = schema
            .regex()
            .captures("address=10.0.0.1/8 comment=\"lab uplink\" ")
            .unwrap();
        assert_eq!(&caps[1], "10.0.0.1/8");
        assert_eq!(&caps[2], "lab uplink");
    }

    #[test]
    fn test_flag_column_captures_unfamiliar_codes() {
        // Dynamic rows print `D`; the column must capture it so decoding
        // can reject it, rather than the row pattern skipping ahead.
        let schema = Schema::new()
            .with_ordinal()
            .with_status_flag("status")
            .with_quoted("name", "name=")
            .compile()
            .unwrap();

        let caps = schema.regex().captures(" 0 D name=\"dyn\"").unwrap();
        assert_eq!(&caps[1], "0");
        assert_eq!(&caps[2], "D");
        assert_eq!(&caps[3], "dyn");
    }

    #[test]
    fn test_key_anchors_are_escaped_literals() {
        // "max-mtu=" contains a regex-meaningful '-': must match literally.
        let schema = Schema::new()
            .with_bare("max_mtu", "max-mtu=")
            .compile()
            .unwrap();
        assert!(schema.regex().is_match("max-mtu=1480 "));
        assert!(!schema.regex().is_match("maxmtu=1480 "));
    }
}
