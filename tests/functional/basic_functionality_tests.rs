//! End-to-end workflows through the CLI entry points

use crate::common::{sample_data, CliTestRunner, Side};
use dumpdiff::cli::CompareMode;
use dumpdiff::commands::{execute, run_comparison};

#[test]
fn test_legacy_mode_flag_end_to_end() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture
        .create_view_dump(Side::Source, "active.json", &sample_data::active_view_rows())
        .unwrap();
    fixture
        .create_view_dump(Side::Target, "replica.json", &sample_data::active_view_rows())
        .unwrap();

    let source = runner.source();
    let target = runner.target();
    let output = runner.expect_success(&["-s", &source, "-t", &target, "-mode", "view", "-c", "1"]);

    assert!(output.comparison.is_consistent());
    assert_eq!(output.stdout.matches("number of such cases :: 0").count(), 5);
}

#[test]
fn test_mode_mismatch_skips_every_file() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture
        .create_transfer_dump(Side::Source, "dump.csv", &sample_data::source_transfer_lines())
        .unwrap();

    // Transfer lines are not a JSON document, so view mode skips the file
    let output = runner.compare("view", &[]).unwrap();
    assert!(output.stdout.contains("Files read: 0 of 1"));
}

#[test]
fn test_report_sections_in_order() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture
        .create_transfer_dump(Side::Source, "dump.csv", &sample_data::source_transfer_lines())
        .unwrap();
    fixture
        .create_transfer_dump(Side::Target, "dump.csv", &sample_data::target_transfer_lines())
        .unwrap();

    let output = runner.compare("cbt", &[]).unwrap();
    let first = output.stdout.find("1) Difference between Source and Target Keys").unwrap();
    let second = output.stdout.find("2) Difference between Target and Source Keys").unwrap();
    let third = output.stdout.find("3) Change Value Analysis for same Keys").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_library_config_matches_cli_run() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture
        .create_transfer_dump(Side::Source, "dump.csv", &sample_data::source_transfer_lines())
        .unwrap();
    fixture
        .create_transfer_dump(Side::Target, "dump.csv", &sample_data::target_transfer_lines())
        .unwrap();

    let config = fixture.config(CompareMode::Cbt);
    let silent = run_comparison(&config).unwrap();

    let mut out = Vec::new();
    let printed = execute(&config, &mut out).unwrap();

    assert_eq!(silent.is_consistent(), printed.is_consistent());
    assert!(!out.is_empty());

    let cli_output = runner.compare("cbt", &[]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), cli_output.stdout);
}
