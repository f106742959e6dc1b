// WHY: Output-file naming and skip-if-complete checks for rerunnable batches

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

/// File name suffix of generated short-title tables
pub const OUTPUT_SUFFIX: &str = "_short.tsv";

/// Header row written at the top of every output file
pub const OUTPUT_HEADER: &str = "line\tnormalized\tshort";

/// Generate output file path for a source file, beside it or under `output_dir`
pub fn generate_output_path(source_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    let file_name = format!("{file_stem}{OUTPUT_SUFFIX}");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source_path.with_file_name(file_name),
    }
}

/// True for files this tool wrote, so directory scans do not feed them back in
pub fn is_output_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(OUTPUT_SUFFIX))
}

/// An output file is complete once it exists and ends with a newline
pub fn output_is_complete(output_path: &Path) -> bool {
    match fs::read(output_path) {
        Ok(content) => content.last() == Some(&b'\n'),
        Err(_) => false,
    }
}

/// Write a complete output file, appending the trailing newline that marks it finished
pub async fn create_complete_output_file(
    output_path: &Path,
    content: &str,
) -> Result<(), io::Error> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let file = tokio::fs::File::create(output_path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).await?;
    if !content.ends_with('\n') {
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}
