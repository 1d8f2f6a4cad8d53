//! Command-line interface for dumpdiff

use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  dumpdiff -s ./source -t ./target -m cbt
  dumpdiff -s ./active -t ./replica -m view -c 1
  dumpdiff --src ./active --tgt ./replica --mode view --count 2 --src-count 1";

#[derive(Parser, Debug)]
#[command(name = "dumpdiff")]
#[command(about = "Compare two directories of data-store dumps and report inconsistencies")]
#[command(long_about = "\
Compare two directories of data-store dumps and report inconsistencies.

cbt mode reads transfer dumps, one record per line: key,exp,flag,cas,rev,value
view mode reads view query output: {\"rows\": [{\"key\": ..., \"value\": <rev>}, ...]}")]
#[command(after_help = EXAMPLES)]
#[command(version)]
pub struct Cli {
    /// Source directory for comparison
    #[arg(short = 's', long = "src", value_name = "DIR")]
    pub src: PathBuf,

    /// Target directory for comparison
    #[arg(short = 't', long = "tgt", value_name = "DIR")]
    pub tgt: PathBuf,

    /// Comparison mode
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: CompareMode,

    /// Expected replica count for target keys (view mode)
    #[arg(short = 'c', long = "count", default_value = "1", value_parser = validate_replica_count)]
    pub count: usize,

    /// Expected replica count for source keys (view mode)
    #[arg(long = "src-count", default_value = "1", value_parser = validate_replica_count)]
    pub src_count: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not draw progress bars while loading
    #[arg(long)]
    pub no_progress: bool,
}

/// Which kind of dump the directories hold
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// View query output in JSON form, with replica count checks
    View,
    /// Transfer dumps in key,exp,flag,cas,rev,value form
    Cbt,
}

impl CompareMode {
    pub fn name(&self) -> &'static str {
        match self {
            CompareMode::View => "view",
            CompareMode::Cbt => "cbt",
        }
    }
}

/// Rewrite legacy single-dash spellings accepted by older tooling:
/// `-mode` becomes `--mode` and `-?` becomes `--help`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-?") => OsString::from("--help"),
            Some("-mode") => OsString::from("--mode"),
            Some(s) if s.starts_with("-mode=") => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}

/// Validate that a replica count is greater than 0
fn validate_replica_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .parse()
        .map_err(|_| format!("Invalid replica count: '{}'. Must be a positive integer.", s))?;

    if count == 0 {
        return Err("Replica count must be greater than 0".to_string());
    }

    Ok(count)
}
