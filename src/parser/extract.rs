//! The record extractor.

use super::record::Record;
use super::schema::{CompiledSchema, FieldKind};
use super::status::EntryStatus;
use crate::error::Result;

/// Extract all records matching `schema` from sanitized console text.
///
/// Records come back in source order, one per row-pattern match, each
/// carrying the schema's full key set (absent optional fields as empty
/// strings). Text that matches no row is ignored, and zero matches is a
/// valid empty result — "no leases issued" looks exactly like this.
/// A status-flag code outside the known set is surfaced as an error
/// rather than silently defaulted.
pub fn extract(text: &str, schema: &CompiledSchema) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for caps in schema.regex().captures_iter(text) {
        let mut record = Record::new();
        for (i, field) in schema.fields().iter().enumerate() {
            let raw = caps.get(i + 1).map(|m| m.as_str()).unwrap_or("");
            let value = match field.kind {
                FieldKind::StatusFlag => EntryStatus::from_flags(raw)?.as_str().to_string(),
                _ => raw.to_string(),
            };
            record.insert(field.name.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}
