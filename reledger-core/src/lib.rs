//! reledger-core: canonical ledger schema and the statement transformation engine

pub mod date;
pub mod header;
pub mod mop;
pub mod schema;
pub mod sheet;
pub mod transform;

pub use date::normalize_date;
pub use header::{CellPos, HeaderMap, HeaderWindow, MissingHeaderError, SourceHeader, locate_headers};
pub use mop::{Mop, MopError};
pub use schema::{CANONICAL_SCHEMA, CanonicalField, FIELD_COUNT};
pub use sheet::{Grid, SheetSource};
pub use transform::{CanonicalRow, FIELD_RULES, FieldRule, RowInput, TransformContext, transform_row};
