use anyhow::Result;
use glob::glob;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::incremental::is_output_file;

/// File extensions picked up when an input is a directory
pub const INPUT_EXTENSIONS: &[&str] = &["txt", "tsv"];

/// Configuration for input discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Result of input file validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Expand CLI inputs (files, directories, glob patterns) into validated input files
///
/// Directories are searched recursively for [`INPUT_EXTENSIONS`] files, skipping
/// previously written `_short.tsv` outputs. Results are deduplicated and sorted.
pub async fn collect_input_files(
    inputs: &[String],
    config: &DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut candidates = BTreeSet::new();
    let mut failures = Vec::new();

    for input in inputs {
        let input_path = Path::new(input);
        let patterns: Vec<String> = if input_path.is_dir() {
            INPUT_EXTENSIONS
                .iter()
                .map(|ext| format!("{}/**/*.{}", input_path.display(), ext))
                .collect()
        } else if input_path.is_file() {
            candidates.insert(input_path.to_path_buf());
            continue;
        } else {
            vec![input.clone()]
        };

        let mut matched = 0usize;
        for pattern in &patterns {
            debug!("Expanding input pattern: {}", pattern);
            let paths = match glob(pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    let error_msg = format!("Invalid input pattern {}: {}", pattern, e);
                    if config.fail_fast {
                        return Err(anyhow::anyhow!(error_msg));
                    }
                    warn!("{}", error_msg);
                    failures.push(FileValidation {
                        path: PathBuf::from(input),
                        error: Some(error_msg),
                    });
                    continue;
                }
            };

            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() && !is_output_file(&path) => {
                        matched += 1;
                        candidates.insert(path);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let error_msg = format!("Glob iteration error: {e}");
                        if config.fail_fast {
                            return Err(anyhow::anyhow!(error_msg));
                        }
                        warn!("{}", error_msg);
                    }
                }
            }
        }

        if matched == 0 && !input_path.is_dir() {
            let error_msg = format!("No input files match: {}", input);
            if config.fail_fast {
                return Err(anyhow::anyhow!(error_msg));
            }
            warn!("{}", error_msg);
            failures.push(FileValidation {
                path: PathBuf::from(input),
                error: Some(error_msg),
            });
        }
    }

    let mut results = Vec::with_capacity(candidates.len() + failures.len());
    for path in candidates {
        results.push(validate_file(path, config).await?);
    }
    results.extend(failures);

    info!("Input discovery completed: {} entries", results.len());
    Ok(results)
}

async fn validate_file(path: PathBuf, config: &DiscoveryConfig) -> Result<FileValidation> {
    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
        Ok(_) => {
            let error = format!("Path is not a file: {}", path.display());
            warn!("{}", error);
            Ok(FileValidation {
                path,
                error: Some(error),
            })
        }
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);

            if config.fail_fast {
                Err(anyhow::anyhow!(error))
            } else {
                Ok(FileValidation {
                    path,
                    error: Some(error),
                })
            }
        }
    }
}
