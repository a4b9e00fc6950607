//! reledger-ingest: spreadsheet engine boundary, statement discovery and legacy conversion.

pub mod convert;
pub mod discovery;
pub mod engine;
pub mod load;
pub mod types;
pub mod xlsx;

pub use convert::{CONVERTED_SUFFIX, ConvertError, convert_legacy, converted_path};
pub use discovery::{Discovered, discover};
pub use engine::{EngineSession, SessionStats, SourceDocument};
pub use load::{OpenError, load_first_sheet};
pub use types::SourceFormat;
