//! vr-results: trajectory export and run manifests.

pub mod export;
pub mod types;

pub use export::{
    CSV_HEADER, manifest_path_for, read_csv, read_csv_from, read_jsonl, read_manifest, write_csv,
    write_csv_to, write_jsonl, write_manifest,
};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected CSV header '{found}', expected 'time_s,voltage_v,mode'")]
    CsvHeader { found: String },

    #[error("Record {index} at t={time_s} has non-finite voltage {voltage_v}")]
    NonFinite {
        index: usize,
        time_s: f64,
        voltage_v: f64,
    },
}
