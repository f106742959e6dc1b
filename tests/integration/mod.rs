// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Raw catalog titles with their expected short titles
pub const CATALOG: &[(&str, &str)] = &[
    ("Premium Yoga Mat SKU1234 Blue 10mm Thick", "Premium Yoga Mat - 10mm Thick"),
    ("Organic Green Tea Bags for Daily Wellness Support 100ct", "Organic Tea Bags - 100ct"),
    ("STAINLESS STEEL Water Bottle, Leak-Proof 750ml", "Stainless Steel Water Bottle, Leak-Proof - 750ml"),
    ("Wireless Earbuds with Charging Case", "Wireless Earbuds"),
    ("Widget,Blue", "Widget"),
];

/// Test fixture helper for creating temporary directories with title files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a title file with given content
    pub fn create_title_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a plain title file from the shared catalog
    pub fn create_catalog_file<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        let content: String = CATALOG.iter().map(|(raw, _)| format!("{raw}\n")).collect();
        self.create_title_file(relative_path, &content)
    }

    /// Path of the output table for a source file
    pub fn output_path<P: AsRef<Path>>(&self, source_path: P) -> PathBuf {
        trimtitle::incremental::generate_output_path(source_path.as_ref(), None)
    }

    /// Read the short-title column of an output table, skipping the header
    pub fn read_short_titles<P: AsRef<Path>>(&self, source_path: P) -> Vec<String> {
        let content = fs::read_to_string(self.output_path(source_path))
            .expect("Failed to read output file");
        content
            .lines()
            .skip(1)
            .map(|line| line.rsplit('\t').next().unwrap_or_default().to_string())
            .collect()
    }
}
