// WHY: Batch boundary of the pipeline; titles are independent so chunks run on blocking workers
// Per-file and per-run statistics stand in for the reporting layer

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::incremental::{
    create_complete_output_file, generate_output_path, output_is_complete, OUTPUT_HEADER,
};
use crate::reader::{AsyncFileReader, ReaderConfig, TitleRecord};
use crate::title::{ShortTitle, ShortTitleRules, TitleShortener};

/// Configuration for batch processing of title files
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub reader: ReaderConfig,
    pub rules: ShortTitleRules,
    /// Number of blocking workers titles are spread across
    pub workers: usize,
    /// Drop records whose raw title repeats an earlier one
    pub dedupe: bool,
    /// Reprocess files whose output is already complete
    pub overwrite_all: bool,
    pub fail_fast: bool,
    /// Write outputs here instead of beside the inputs
    pub output_dir: Option<PathBuf>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            reader: ReaderConfig::default(),
            rules: ShortTitleRules::default(),
            workers: num_cpus::get().max(1),
            dedupe: false,
            overwrite_all: false,
            fail_fast: false,
            output_dir: None,
        }
    }
}

/// One processed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedRecord {
    pub line: u64,
    pub raw_chars: usize,
    pub normalized: String,
    pub short: ShortTitle,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FileStats {
    /// Input file path
    pub path: String,
    /// Output file path, absent when nothing was written
    pub output_path: Option<String>,
    pub records_read: u64,
    pub bytes_read: u64,
    /// Time spent reading the input in milliseconds
    pub read_time_ms: u64,
    /// Records whose title was empty or missing
    pub missing_titles: u64,
    pub duplicates_dropped: u64,
    pub titles_shortened: u64,
    /// Short titles ending in a measurement suffix
    pub suffixes_retained: u64,
    /// Short titles cut at the character budget
    pub titles_truncated: u64,
    /// Short titles that came out empty
    pub empty_results: u64,
    pub avg_raw_chars: f64,
    pub avg_short_chars: f64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    pub titles_per_sec: f64,
    /// Processing status (success, skipped, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    fn with_status(path: &Path, status: &str, error: Option<String>) -> Self {
        Self {
            path: path.display().to_string(),
            status: status.to_string(),
            error,
            ..Default::default()
        }
    }

    fn record_results(&mut self, results: &[ShortenedRecord]) {
        self.titles_shortened = results.len() as u64;
        let mut raw_total = 0usize;
        let mut short_total = 0usize;
        for record in results {
            raw_total += record.raw_chars;
            short_total += record.short.len();
            if record.short.suffix_retained {
                self.suffixes_retained += 1;
            }
            if record.short.truncated {
                self.titles_truncated += 1;
            }
            if record.short.is_empty() {
                self.empty_results += 1;
            }
        }
        if !results.is_empty() {
            self.avg_raw_chars = raw_total as f64 / results.len() as f64;
            self.avg_short_chars = short_total as f64 / results.len() as f64;
        }
    }
}

/// Whole-run statistics written to the stats file
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    /// Run start as seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_records: u64,
    pub total_titles_shortened: u64,
    pub overall_titles_per_sec: f64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn new() -> Self {
        let run_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            run_start,
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, stats: FileStats) {
        match stats.status.as_str() {
            "success" => self.files_processed += 1,
            "skipped" => self.files_skipped += 1,
            _ => self.files_failed += 1,
        }
        self.total_records += stats.records_read;
        self.total_titles_shortened += stats.titles_shortened;
        self.file_stats.push(stats);
    }

    /// Stamp the total elapsed time and overall throughput
    pub fn finish(&mut self, elapsed_ms: u64) {
        self.total_processing_time_ms = elapsed_ms;
        self.overall_titles_per_sec = throughput(self.total_titles_shortened, elapsed_ms);
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

fn throughput(count: u64, elapsed_ms: u64) -> f64 {
    // Sub-millisecond runs count as one millisecond
    count as f64 / (elapsed_ms.max(1) as f64 / 1000.0)
}

/// Drop records whose raw title was already seen; absent titles are all kept
pub fn dedupe_records(records: Vec<TitleRecord>) -> (Vec<TitleRecord>, u64) {
    let mut seen = HashSet::new();
    let mut dropped = 0u64;
    let kept = records
        .into_iter()
        .filter(|record| match &record.raw {
            Some(raw) if !seen.insert(raw.clone()) => {
                dropped += 1;
                false
            }
            _ => true,
        })
        .collect();
    (kept, dropped)
}

fn shorten_chunk(records: Vec<TitleRecord>, shortener: &TitleShortener) -> Vec<ShortenedRecord> {
    let mut normalized = String::new();
    records
        .into_iter()
        .map(|record| {
            let raw = record.raw.as_deref();
            crate::title::normalize_into(raw, &mut normalized);
            ShortenedRecord {
                line: record.line,
                raw_chars: raw.map_or(0, |r| r.chars().count()),
                short: shortener.shorten_normalized(&normalized),
                normalized: normalized.clone(),
            }
        })
        .collect()
}

/// Normalize and shorten records across blocking workers, preserving input order
pub async fn shorten_records_parallel(
    records: Vec<TitleRecord>,
    shortener: Arc<TitleShortener>,
    workers: usize,
) -> Result<Vec<ShortenedRecord>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = records.len().div_ceil(workers.max(1));
    debug!("Shortening {} titles in chunks of {}", records.len(), chunk_size);

    let mut handles = Vec::new();
    let mut remaining = records.into_iter();
    loop {
        let chunk: Vec<TitleRecord> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let shortener = Arc::clone(&shortener);
        handles.push(tokio::task::spawn_blocking(move || shorten_chunk(chunk, &shortener)));
    }

    let mut results = Vec::new();
    for chunk in futures::future::join_all(handles).await {
        results.extend(chunk?);
    }
    Ok(results)
}

/// Render records as output table content
pub fn format_output(records: &[ShortenedRecord]) -> String {
    let mut output = String::from(OUTPUT_HEADER);
    output.push('\n');
    for record in records {
        output.push_str(&format!("{}\t{}\t{}\n", record.line, record.normalized, record.short));
    }
    output
}

/// Write the output table as a complete output file
pub async fn write_output_file(output_path: &Path, records: &[ShortenedRecord]) -> Result<()> {
    create_complete_output_file(output_path, &format_output(records)).await?;
    Ok(())
}

/// Check whether a source file needs processing given its output state
pub fn should_process_file(source_path: &Path, config: &ProcessingConfig) -> bool {
    if config.overwrite_all {
        return true;
    }
    let output_path = generate_output_path(source_path, config.output_dir.as_deref());
    !output_is_complete(&output_path)
}

/// Read, shorten and write one input file
///
/// Returns `Err` only under `fail_fast`; otherwise failures are reported in the stats.
pub async fn process_file(
    source_path: &Path,
    config: &ProcessingConfig,
    shortener: Arc<TitleShortener>,
) -> Result<FileStats> {
    let start_time = Instant::now();

    if !should_process_file(source_path, config) {
        info!("Skipping {}: output already complete", source_path.display());
        return Ok(FileStats::with_status(source_path, "skipped", None));
    }

    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: config.fail_fast,
        ..config.reader.clone()
    });
    let (records, read_stats) = reader.read_titles(source_path).await?;
    if let Some(error) = read_stats.read_error {
        return Ok(FileStats::with_status(source_path, "failed", Some(error)));
    }

    let mut stats = FileStats::with_status(source_path, "success", None);
    stats.records_read = records.len() as u64;
    stats.missing_titles = read_stats.missing_titles;
    stats.bytes_read = read_stats.bytes_read;
    stats.read_time_ms = read_stats.duration_ms;

    let records = if config.dedupe {
        let (kept, dropped) = dedupe_records(records);
        stats.duplicates_dropped = dropped;
        kept
    } else {
        records
    };

    let results = shorten_records_parallel(records, shortener, config.workers).await?;
    stats.record_results(&results);

    let output_path = generate_output_path(source_path, config.output_dir.as_deref());
    if let Err(e) = write_output_file(&output_path, &results).await {
        let error_msg = format!("Failed to write {}: {}", output_path.display(), e);
        if config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }
        warn!("{}", error_msg);
        stats.status = "failed".to_string();
        stats.error = Some(error_msg);
    } else {
        stats.output_path = Some(output_path.display().to_string());
    }

    stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
    stats.titles_per_sec = throughput(stats.titles_shortened, stats.processing_time_ms);

    info!(
        "Processed {}: {} titles, {} suffixes kept, {} truncated in {}ms",
        stats.path,
        stats.titles_shortened,
        stats.suffixes_retained,
        stats.titles_truncated,
        stats.processing_time_ms
    );
    Ok(stats)
}
