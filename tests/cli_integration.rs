use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{TestFixture, CATALOG};

fn trimtitle() -> Command {
    Command::new(env!("CARGO_BIN_EXE_trimtitle"))
}

/// Test that --stats-out creates valid JSON with the expected structure
#[test]
fn test_stats_output_json_structure() {
    let fixture = TestFixture::new();
    let source = fixture.create_catalog_file("catalog.txt");
    let stats_file = fixture.root_path.join("stats/run.json");

    let output = trimtitle()
        .arg(fixture.root_path.as_os_str())
        .arg("--stats-out")
        .arg(stats_file.as_os_str())
        .arg("--no-progress")
        .output()
        .expect("Failed to run trimtitle");

    assert!(output.status.success(), "trimtitle failed: {}", String::from_utf8_lossy(&output.stderr));

    let stats: Value = serde_json::from_str(&std::fs::read_to_string(&stats_file).unwrap())
        .expect("Failed to parse JSON");
    let obj = stats.as_object().expect("Stats should be a JSON object");

    for key in [
        "run_start",
        "total_processing_time_ms",
        "total_records",
        "total_titles_shortened",
        "overall_titles_per_sec",
        "files_processed",
        "files_skipped",
        "files_failed",
        "file_stats",
    ] {
        assert!(obj.contains_key(key), "Missing {key} field");
    }

    assert_eq!(obj["files_processed"].as_u64(), Some(1));
    assert_eq!(obj["files_failed"].as_u64(), Some(0));
    assert_eq!(obj["total_titles_shortened"].as_u64(), Some(CATALOG.len() as u64));

    let file_stats = obj["file_stats"].as_array().expect("file_stats should be an array");
    assert_eq!(file_stats.len(), 1);
    let file_obj = file_stats[0].as_object().unwrap();
    assert_eq!(file_obj["status"].as_str(), Some("success"));
    assert!(file_obj["error"].is_null());
    assert_eq!(file_obj["suffixes_retained"].as_u64(), Some(3));
    let catalog_bytes: usize = CATALOG.iter().map(|(raw, _)| raw.len() + 1).sum();
    assert_eq!(file_obj["bytes_read"].as_u64(), Some(catalog_bytes as u64));
    assert!(file_obj["read_time_ms"].is_u64());

    let expected: Vec<String> = CATALOG.iter().map(|(_, short)| short.to_string()).collect();
    assert_eq!(fixture.read_short_titles(&source), expected);
}

/// Test that a second run skips files with complete outputs
#[test]
fn test_second_run_skips_complete_outputs() {
    let fixture = TestFixture::new();
    fixture.create_catalog_file("catalog.txt");
    let stats_file = fixture.root_path.join("run.json");

    let run = || {
        trimtitle()
            .arg(fixture.root_path.as_os_str())
            .arg("--stats-out")
            .arg(stats_file.as_os_str())
            .arg("--no-progress")
            .output()
            .expect("Failed to run trimtitle")
    };

    assert!(run().status.success());
    let second = run();
    assert!(second.status.success());

    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(
        stdout.contains("Skipped (complete outputs): 1 files"),
        "Second run should report 1 skipped file, stdout: {stdout}"
    );
}

/// Test line-oriented stdin to stdout mode
#[test]
fn test_stdin_mode() {
    let mut child = trimtitle()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn trimtitle");

    let input: String = CATALOG.iter().map(|(raw, _)| format!("{raw}\n")).collect();
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "trimtitle failed: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected: Vec<&str> = CATALOG.iter().map(|(_, short)| *short).collect();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
}

/// Test that --fail-fast aborts on an input that matches nothing
#[test]
fn test_fail_fast_on_missing_input() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("missing.txt");

    let lenient = trimtitle()
        .arg(missing.as_os_str())
        .arg("--stats-out")
        .arg(fixture.root_path.join("lenient.json").as_os_str())
        .arg("--no-progress")
        .output()
        .unwrap();
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("Failed: 1 files"));

    let strict = trimtitle()
        .arg(missing.as_os_str())
        .arg("--fail-fast")
        .arg("--no-progress")
        .output()
        .unwrap();
    assert!(!strict.status.success());
}
