use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for title ingestion
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
    /// Tab-separated field holding the title; `None` means the whole line
    pub column: Option<usize>,
    /// Skip the first line as a header row
    pub skip_header: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
            column: None,
            skip_header: false,
        }
    }
}

/// One input record; `raw` is `None` for a missing title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    /// 1-based line number in the source
    pub line: u64,
    pub raw: Option<String>,
}

/// Statistics for title reading operations
#[derive(Debug, Clone, Default)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub missing_titles: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Extract the title field from one input line
pub fn parse_record(line: &str, line_number: u64, column: Option<usize>) -> TitleRecord {
    let field = match column {
        Some(index) => line.split('\t').nth(index),
        None => Some(line),
    };
    let raw = field
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string);
    TitleRecord {
        line: line_number,
        raw,
    }
}

/// Async reader that streams titles line-by-line
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read all title records from a file
    pub async fn read_titles<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Vec<TitleRecord>, ReadStats)> {
        let path = file_path.as_ref();
        let label = path.display().to_string();

        debug!("Starting async read of file: {}", label);

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", label, e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                let stats = ReadStats {
                    file_path: label,
                    read_error: Some(error_msg),
                    ..Default::default()
                };
                return Ok((Vec::new(), stats));
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        self.read_titles_from(reader, label).await
    }

    /// Read title records from any buffered source, e.g. stdin
    pub async fn read_titles_from<R: AsyncBufRead + Unpin>(
        &self,
        reader: R,
        label: String,
    ) -> Result<(Vec<TitleRecord>, ReadStats)> {
        let start_time = std::time::Instant::now();
        let mut lines = reader.lines();
        let mut records = Vec::new();
        let mut stats = ReadStats {
            file_path: label,
            ..Default::default()
        };

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    stats.bytes_read += line.len() as u64 + 1;
                    stats.lines_read += 1;

                    if self.config.skip_header && stats.lines_read == 1 {
                        continue;
                    }

                    let record = parse_record(&line, stats.lines_read, self.config.column);
                    if record.raw.is_none() {
                        stats.missing_titles += 1;
                    }
                    records.push(record);
                }
                Ok(None) => break,
                Err(e) => {
                    let error_msg = format!(
                        "UTF-8 decoding error in {} at line {}: {}",
                        stats.file_path,
                        stats.lines_read + 1,
                        e
                    );
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Err(anyhow::anyhow!(error_msg));
                    }
                    // Return partial results with error information
                    stats.duration_ms = start_time.elapsed().as_millis() as u64;
                    stats.read_error = Some(error_msg);
                    return Ok((records, stats));
                }
            }
        }

        stats.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Read {}: {} lines, {} titles ({} missing) in {}ms",
            stats.file_path,
            stats.lines_read,
            records.len(),
            stats.missing_titles,
            stats.duration_ms
        );
        Ok((records, stats))
    }
}

/// Convenience function for reading one file of plain titles with default configuration
pub async fn read_titles_async<P: AsRef<Path>>(file_path: P) -> Result<Vec<TitleRecord>> {
    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: true,
        ..Default::default()
    });
    let (records, _stats) = reader.read_titles(file_path).await?;
    Ok(records)
}
