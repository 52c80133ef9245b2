//! Exporting kept intervals as CSV or JSON.

use crate::error::{Error, Result};
use crate::output::IntervalWriter;
use crate::selector::{ClipInterval, Parameters, TrailingRun};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Export file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `start,end,duration` rows.
    Csv,
    /// Object with source, parameters and intervals.
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON, anything else CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

#[derive(Debug, Serialize)]
struct IntervalRow {
    start: f64,
    end: f64,
    duration: f64,
}

impl From<&ClipInterval> for IntervalRow {
    fn from(interval: &ClipInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            duration: interval.duration(),
        }
    }
}

/// CSV interval writer.
pub struct CsvIntervalWriter {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
}

impl CsvIntervalWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(file)),
        })
    }

    fn csv_err(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl IntervalWriter for CsvIntervalWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(["start", "end", "duration"])
            .map_err(|e| self.csv_err(e))
    }

    fn write_interval(&mut self, interval: &ClipInterval) -> Result<()> {
        self.writer
            .serialize(IntervalRow::from(interval))
            .map_err(|e| self.csv_err(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct JsonParameters {
    chunk: f64,
    window: f64,
    thresh: f32,
    min_clip: f64,
    keep_tail: bool,
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    source: &'a Path,
    parameters: JsonParameters,
    kept_secs: f64,
    intervals: &'a [IntervalRow],
}

/// JSON interval writer. Buffers intervals and writes on finalize.
pub struct JsonIntervalWriter {
    path: PathBuf,
    source: PathBuf,
    parameters: JsonParameters,
    rows: Vec<IntervalRow>,
}

impl JsonIntervalWriter {
    /// Create a new JSON writer.
    #[must_use]
    pub fn new(path: &Path, source: &Path, params: &Parameters) -> Self {
        Self {
            path: path.to_path_buf(),
            source: source.to_path_buf(),
            parameters: JsonParameters {
                chunk: params.chunk_length(),
                window: params.window_length(),
                thresh: params.threshold(),
                min_clip: params.min_clip(),
                keep_tail: params.trailing() == TrailingRun::Close,
            },
            rows: Vec::new(),
        }
    }
}

impl IntervalWriter for JsonIntervalWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_interval(&mut self, interval: &ClipInterval) -> Result<()> {
        self.rows.push(IntervalRow::from(interval));
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let export = JsonExport {
            source: &self.source,
            parameters: self.parameters,
            kept_secs: self.rows.iter().map(|r| r.duration).sum(),
            intervals: &self.rows,
        };

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &export).map_err(|e| Error::JsonWrite {
            path: self.path.clone(),
            source: e,
        })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write `intervals` to `path`, in the format its extension selects.
pub fn export_intervals(
    path: &Path,
    source: &Path,
    params: &Parameters,
    intervals: &[ClipInterval],
) -> Result<()> {
    let format = ExportFormat::from_path(path);
    let mut writer: Box<dyn IntervalWriter> = match format {
        ExportFormat::Csv => Box::new(CsvIntervalWriter::new(path)?),
        ExportFormat::Json => Box::new(JsonIntervalWriter::new(path, source, params)),
    };

    writer.write_header()?;
    for interval in intervals {
        writer.write_interval(interval)?;
    }
    writer.finalize()?;

    info!(
        "Exported {} intervals to {} ({:?})",
        intervals.len(),
        path.display(),
        format
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn intervals() -> Vec<ClipInterval> {
        vec![
            ClipInterval {
                start: 0.5,
                end: 2.0,
            },
            ClipInterval {
                start: 4.0,
                end: 6.25,
            },
        ]
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("cuts.json")),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("cuts.JSON")),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("cuts.csv")),
            ExportFormat::Csv
        );
        assert_eq!(ExportFormat::from_path(Path::new("cuts")), ExportFormat::Csv);
    }

    #[test]
    fn test_export_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cuts.csv");
        export_intervals(
            &path,
            Path::new("talk.mp4"),
            &Parameters::default(),
            &intervals(),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "start,end,duration");
        assert_eq!(lines[1], "0.5,2.0,1.5");
        assert_eq!(lines[2], "4.0,6.25,2.25");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cuts.json");
        let params = Parameters::default().with_trailing(TrailingRun::Close);
        export_intervals(&path, Path::new("talk.mp4"), &params, &intervals()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["source"], "talk.mp4");
        assert_eq!(value["parameters"]["keep_tail"], true);
        assert_eq!(value["parameters"]["min_clip"], 1.5);
        assert_eq!(value["kept_secs"], 3.75);
        assert_eq!(value["intervals"].as_array().unwrap().len(), 2);
        assert_eq!(value["intervals"][1]["duration"], 2.25);
    }

    #[test]
    fn test_export_empty_csv_has_no_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cuts.csv");
        export_intervals(&path, Path::new("a.mp4"), &Parameters::default(), &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "start,end,duration\n");
    }
}
