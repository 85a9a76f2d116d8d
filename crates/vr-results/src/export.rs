//! CSV and JSONL trajectory files.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::types::{RunManifest, TrajectoryRecord};
use crate::{ResultsError, ResultsResult};

/// Column names, in `TrajectoryRecord` field order.
pub const CSV_HEADER: [&str; 3] = ["time_s", "voltage_v", "mode"];

/// Write records with a header row to any writer (file, `Vec<u8>`, stdout).
pub fn write_csv_to<W: Write>(writer: W, records: &[TrajectoryRecord]) -> ResultsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[TrajectoryRecord]) -> ResultsResult<()> {
    let file = File::create(path)?;
    write_csv_to(file, records)
}

pub fn read_csv_from<R: Read>(reader: R) -> ResultsResult<Vec<TrajectoryRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let header = rdr.headers()?;
    if header.iter().ne(CSV_HEADER) {
        return Err(ResultsError::CsvHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = Vec::new();
    for row in rdr.deserialize() {
        let record: TrajectoryRecord = row?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_csv(path: &Path) -> ResultsResult<Vec<TrajectoryRecord>> {
    let file = File::open(path)?;
    read_csv_from(file)
}

/// One JSON object per line. JSON has no NaN or infinity, so a record with a
/// non-finite value is refused before anything is written.
pub fn write_jsonl(path: &Path, records: &[TrajectoryRecord]) -> ResultsResult<()> {
    ensure_json_representable(records)?;
    let mut content = String::new();
    for record in records {
        let line = serde_json::to_string(record)?;
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

fn ensure_json_representable(records: &[TrajectoryRecord]) -> ResultsResult<()> {
    match records
        .iter()
        .position(|r| !(r.time_s.is_finite() && r.voltage_v.is_finite()))
    {
        Some(index) => Err(ResultsError::NonFinite {
            index,
            time_s: records[index].time_s,
            voltage_v: records[index].voltage_v,
        }),
        None => Ok(()),
    }
}

pub fn read_jsonl(path: &Path) -> ResultsResult<Vec<TrajectoryRecord>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            let record: TrajectoryRecord = serde_json::from_str(line)?;
            records.push(record);
        }
    }
    Ok(records)
}

/// `run.jsonl` -> `run.manifest.json`
pub fn manifest_path_for(output: &Path) -> PathBuf {
    output.with_extension("manifest.json")
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> ResultsResult<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> ResultsResult<RunManifest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
