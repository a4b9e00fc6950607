//! reledger-ledger: canonical ledger writers and the per-file / batch pipeline

pub mod pipeline;
pub mod report;
pub mod writer;

pub use pipeline::{FileError, PipelineOptions, convert_batch, process_file, run_batch, run_batch_in};
pub use report::{BatchReport, FileOutcome, FileStatus};
pub use writer::{CsvSink, LedgerSink, SaveError, SinkError, XlsxSink, open_sink, output_path};
