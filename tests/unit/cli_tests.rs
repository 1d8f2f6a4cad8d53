//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use dumpdiff::cli::{normalize_args, Cli, CompareMode};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut cmd_args = vec!["dumpdiff"];
    cmd_args.extend(args);
    Cli::try_parse_from(normalize_args(cmd_args))
}

#[test]
fn test_cli_short_flags() {
    let cli = parse(&["-s", "./src", "-t", "./tgt", "-m", "cbt"]).unwrap();
    assert_eq!(cli.src.to_str().unwrap(), "./src");
    assert_eq!(cli.tgt.to_str().unwrap(), "./tgt");
    assert_eq!(cli.mode, CompareMode::Cbt);
    assert_eq!(cli.count, 1);
    assert_eq!(cli.src_count, 1);
    assert!(!cli.verbose);
    assert!(!cli.no_progress);
}

#[test]
fn test_cli_long_flags() {
    let cli = parse(&[
        "--src", "./active",
        "--tgt", "./replica",
        "--mode", "view",
        "--count", "2",
        "--src-count", "3",
        "--no-progress",
    ])
    .unwrap();

    assert_eq!(cli.mode, CompareMode::View);
    assert_eq!(cli.count, 2);
    assert_eq!(cli.src_count, 3);
    assert!(cli.no_progress);
}

#[test]
fn test_cli_legacy_mode_spelling() {
    let cli = parse(&["-s", "a", "-t", "b", "-mode", "view", "-c", "1"]).unwrap();
    assert_eq!(cli.mode, CompareMode::View);
}

#[test]
fn test_cli_missing_required() {
    let error = parse(&["-s", "a", "-t", "b"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert!(error.to_string().contains("--mode"));

    assert!(parse(&["-t", "b", "-m", "cbt"]).is_err());
    assert!(parse(&["-s", "a", "-m", "cbt"]).is_err());
}

#[test]
fn test_cli_invalid_mode() {
    let error = parse(&["-s", "a", "-t", "b", "-m", "sql"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_cli_invalid_count() {
    assert!(parse(&["-s", "a", "-t", "b", "-m", "view", "-c", "0"]).is_err());
    assert!(parse(&["-s", "a", "-t", "b", "-m", "view", "-c", "two"]).is_err());
}

#[test]
fn test_cli_unknown_option() {
    let error = parse(&["-s", "a", "-t", "b", "-m", "cbt", "--bogus"]).unwrap_err();
    assert_eq!(error.kind(), clap::error::ErrorKind::UnknownArgument);
}

#[test]
fn test_cli_help_spellings() {
    for flag in ["-h", "--help", "-?"] {
        let error = parse(&[flag]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp, "flag {}", flag);
    }
}
