//! Declarative record extraction from semi-tabular console output.
//!
//! One extractor driven by per-entity [`Schema`] values replaces
//! hand-written per-entity patterns; the status-flag mapping lives in one
//! place.

mod extract;
mod record;
mod schema;
mod status;

pub use extract::extract;
pub use record::{Record, lookup_number};
pub use schema::{CompiledSchema, FieldKind, FieldSpec, Schema};
pub use status::EntryStatus;
