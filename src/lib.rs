pub mod title;
pub mod discovery;
pub mod reader;
pub mod incremental;
pub mod parallel_processing;

// Re-export the core pipeline for convenient access
pub use title::{
    extract_suffix, generate_short_title, is_color_token, is_product_code, normalize,
    ShortTitle, ShortTitleRules, TitleShortener,
};

// Re-export batch processing types and functions for benchmarking
pub use parallel_processing::{
    FileStats, ProcessingConfig, RunStats, ShortenedRecord,
    process_file, shorten_records_parallel, should_process_file,
};
