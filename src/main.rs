use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{info, warn};

use trimtitle::discovery::{self, DiscoveryConfig};
use trimtitle::parallel_processing::{
    process_file, shorten_records_parallel, FileStats, ProcessingConfig, RunStats,
};
use trimtitle::reader::{AsyncFileReader, ReaderConfig};
use trimtitle::title::{ShortTitleRules, TitleShortener, DEFAULT_MAX_CHARS};

#[derive(Parser, Debug)]
#[command(name = "trimtitle")]
#[command(about = "Shorten noisy e-commerce product titles into SEO-friendly titles")]
#[command(version)]
struct Args {
    /// Input files, directories or glob patterns; reads stdin when omitted
    inputs: Vec<String>,

    /// Write `<stem>_short.tsv` outputs here instead of beside the inputs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Tab-separated field (0-based) holding the title
    #[arg(long)]
    column: Option<usize>,

    /// Skip the first line of every input
    #[arg(long)]
    header: bool,

    /// Drop repeated raw titles within a file
    #[arg(long)]
    dedupe: bool,

    /// Character budget of a short title
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Worker count for title shortening (default: number of CPUs)
    #[arg(long)]
    workers: Option<usize>,

    /// Overwrite even complete output files
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

impl Args {
    fn processing_config(&self) -> ProcessingConfig {
        let defaults = ProcessingConfig::default();
        ProcessingConfig {
            reader: ReaderConfig {
                fail_fast: self.fail_fast,
                column: self.column,
                skip_header: self.header,
                ..Default::default()
            },
            rules: ShortTitleRules {
                max_chars: self.max_chars,
                ..Default::default()
            },
            workers: self.workers.unwrap_or(defaults.workers).max(1),
            dedupe: self.dedupe,
            overwrite_all: self.overwrite_all,
            fail_fast: self.fail_fast,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb
}

/// Line-oriented mode: titles on stdin, short titles on stdout
async fn run_stdin(config: &ProcessingConfig, shortener: Arc<TitleShortener>) -> Result<()> {
    let reader = AsyncFileReader::new(config.reader.clone());
    let stdin = BufReader::new(tokio::io::stdin());
    let (records, stats) = reader.read_titles_from(stdin, "<stdin>".to_string()).await?;
    if let Some(error) = stats.read_error {
        warn!("Stopped reading stdin early: {}", error);
    }

    let results = shorten_records_parallel(records, shortener, config.workers).await?;

    let mut stdout = tokio::io::stdout();
    for result in &results {
        stdout.write_all(result.short.as_str().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;

    info!("Shortened {} titles from stdin", results.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries results in stdin mode, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting trimtitle");
    info!(?args, "Parsed CLI arguments");

    if args.max_chars == 0 {
        anyhow::bail!("--max-chars must be greater than zero");
    }

    let config = args.processing_config();
    let shortener = Arc::new(TitleShortener::new(config.rules.clone()));

    if args.inputs.is_empty() {
        return run_stdin(&config, shortener).await;
    }

    let run_start = Instant::now();
    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
    };
    let discovered = discovery::collect_input_files(&args.inputs, &discovery_config).await?;

    let mut run_stats = RunStats::new();
    let pb = progress_bar(discovered.len() as u64, args.no_progress);

    for file in discovered {
        pb.set_message(file.path.display().to_string());

        let stats = match file.error {
            Some(error) => FileStats {
                path: file.path.display().to_string(),
                status: "failed".to_string(),
                error: Some(error),
                ..Default::default()
            },
            None => process_file(&file.path, &config, Arc::clone(&shortener)).await?,
        };

        if let Some(ref error) = stats.error {
            info!("Issue with {}: {}", stats.path, error);
        }
        run_stats.add_file(stats);
        pb.inc(1);
    }
    pb.finish_and_clear();

    run_stats.finish(run_start.elapsed().as_millis() as u64);
    run_stats.save(&args.stats_out).await?;

    println!("trimtitle v{} - run complete", env!("CARGO_PKG_VERSION"));
    println!("  Processed: {} files", run_stats.files_processed);
    println!("  Skipped (complete outputs): {} files", run_stats.files_skipped);
    if run_stats.files_failed > 0 {
        println!("  Failed: {} files", run_stats.files_failed);
    }
    println!("  Titles shortened: {}", run_stats.total_titles_shortened);
    println!("  Stats written to: {}", args.stats_out.display());

    info!(
        "Run completed: {} processed, {} skipped, {} failed",
        run_stats.files_processed, run_stats.files_skipped, run_stats.files_failed
    );
    Ok(())
}
