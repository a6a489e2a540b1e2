//! Output module
//!
//! Writes the analysis results as JSON for use outside the terminal.

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dedup::DedupStats;
use crate::error::{Error, Result};
use crate::processor::Analysis;
use crate::report::FrequencyReport;
use crate::stopwords::Language;

/// Serializable view of one analysis
#[derive(Debug, Serialize)]
pub struct AnalysisExport<'a> {
    pub artist: &'a str,
    pub language: Language,
    pub songs_fetched: usize,
    pub unique_songs: usize,
    pub dedup: DedupSummary,
    pub words_kept: usize,
    pub words_filtered_out: usize,
    pub reports: Vec<&'a FrequencyReport>,
}

#[derive(Debug, Serialize)]
pub struct DedupSummary {
    pub duplicates: usize,
    pub replaced_by_longer: usize,
}

impl From<DedupStats> for DedupSummary {
    fn from(stats: DedupStats) -> Self {
        Self {
            duplicates: stats.duplicates,
            replaced_by_longer: stats.replaced,
        }
    }
}

impl<'a> AnalysisExport<'a> {
    pub fn new(analysis: &'a Analysis, reports: &'a [FrequencyReport]) -> Self {
        Self {
            artist: &analysis.artist,
            language: analysis.language,
            songs_fetched: analysis.dedup_stats.total,
            unique_songs: analysis.unique_lyrics.len(),
            dedup: analysis.dedup_stats.into(),
            words_kept: analysis.words.len(),
            words_filtered_out: analysis.filtered_out,
            reports: reports.iter().collect(),
        }
    }
}

/// Write `value` as pretty JSON, creating parent directories as needed
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_output_dir(parent)?;
    }

    let file: File = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(e, path.to_path_buf()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n").map_err(|e| Error::io(e, path.to_path_buf()))?;
    writer.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;
    Ok(())
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    }
    Ok(())
}
