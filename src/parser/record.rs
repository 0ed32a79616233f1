//! Extracted records and the name-to-number lookup helper.

use indexmap::IndexMap;

use crate::error::{ClientError, Result};

/// Field name the ordinal row number is surfaced under.
///
/// The router addresses entities by this number in later `set`/`remove`
/// commands (`numbers=N`), and renumbers remaining rows after a removal,
/// so the number is carried as data rather than as container position.
pub const NUMBER_FIELD: &str = "number";

/// One structured entity extracted from console output.
///
/// Fields keep schema order for iteration but are looked up by name. Every
/// record from one extraction call has the identical key set; absent
/// optional fields hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The ordinal row number, when the schema captured one.
    pub fn number(&self) -> Option<&str> {
        self.get(NUMBER_FIELD)
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Resolve a human-given field value to the router's row number by linear
/// scan (result sets are tens of rows at most).
///
/// This is client-layer policy on top of a valid empty extraction: a miss
/// is a [`ClientError::NotFound`] naming the entity, not a parse error.
pub fn lookup_number(records: &[Record], field: &str, value: &str, entity: &str) -> Result<String> {
    records
        .iter()
        .find(|r| r.get(field) == Some(value))
        .and_then(Record::number)
        .map(str::to_string)
        .ok_or_else(|| {
            ClientError::NotFound {
                entity: entity.to_string(),
                name: value.to_string(),
            }
            .into()
        })
}
