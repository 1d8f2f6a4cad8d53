//! Comparison runs for each mode

use crate::cli::CompareMode;
use crate::config::Config;
use crate::diff::{diff_snapshots, SnapshotDiff};
use crate::error::Result;
use crate::loader::{DumpFormat, DumpLoader, LoadReport, TransferFormat, ViewFormat};
use crate::output::PrettyPrinter;
use crate::record::{TransferRecord, ViewRecord};
use crate::replica::{check_replica_counts, ReplicaAnomalies};
use std::io::Write;
use std::path::Path;

/// Outcome of comparing two transfer dump directories
#[derive(Debug, Clone)]
pub struct TransferComparison {
    pub source: LoadReport<TransferRecord>,
    pub target: LoadReport<TransferRecord>,
    pub diff: SnapshotDiff<TransferRecord>,
}

/// Outcome of comparing two view dump directories
#[derive(Debug, Clone)]
pub struct ViewComparison {
    pub source: LoadReport<ViewRecord>,
    pub target: LoadReport<ViewRecord>,
    pub diff: SnapshotDiff<ViewRecord>,
    pub source_replicas: ReplicaAnomalies,
    pub target_replicas: ReplicaAnomalies,
}

/// Result of a run in either mode
#[derive(Debug, Clone)]
pub enum Comparison {
    Transfer(TransferComparison),
    View(ViewComparison),
}

impl Comparison {
    /// Whether the two sides agree on every check
    pub fn is_consistent(&self) -> bool {
        match self {
            Comparison::Transfer(c) => c.diff.is_empty(),
            Comparison::View(c) => {
                c.diff.is_empty() && c.source_replicas.is_empty() && c.target_replicas.is_empty()
            }
        }
    }
}

/// Load both sides of a comparison in the same format
fn load_pair<F: DumpFormat>(
    loader: &DumpLoader,
    source: &Path,
    target: &Path,
) -> Result<(LoadReport<F::Record>, LoadReport<F::Record>)> {
    let source = loader.load_directory::<F>(source, "source")?;
    let target = loader.load_directory::<F>(target, "target")?;
    Ok((source, target))
}

pub fn compare_transfer_dumps(loader: &DumpLoader, source: &Path, target: &Path) -> Result<TransferComparison> {
    let (source, target) = load_pair::<TransferFormat>(loader, source, target)?;
    let diff = diff_snapshots(source.snapshot.values(), target.snapshot.values());

    Ok(TransferComparison { source, target, diff })
}

pub fn compare_view_dumps(
    loader: &DumpLoader,
    source: &Path,
    target: &Path,
    source_replicas: usize,
    target_replicas: usize,
) -> Result<ViewComparison> {
    let (source, target) = load_pair::<ViewFormat>(loader, source, target)?;
    let diff = diff_snapshots(source.snapshot.values(), target.snapshot.values());
    let source_anomalies = check_replica_counts(source.snapshot.counts(), source_replicas);
    let target_anomalies = check_replica_counts(target.snapshot.counts(), target_replicas);

    Ok(ViewComparison {
        source,
        target,
        diff,
        source_replicas: source_anomalies,
        target_replicas: target_anomalies,
    })
}

/// Run the comparison a config describes without printing anything
pub fn run_comparison(config: &Config) -> Result<Comparison> {
    let loader = DumpLoader::new().with_progress(config.show_progress);

    let comparison = match config.mode {
        CompareMode::Cbt => Comparison::Transfer(compare_transfer_dumps(&loader, &config.source, &config.target)?),
        CompareMode::View => Comparison::View(compare_view_dumps(
            &loader,
            &config.source,
            &config.target,
            config.source_replicas,
            config.target_replicas,
        )?),
    };

    log::debug!(
        "{} comparison finished, consistent: {}",
        config.mode.name(),
        comparison.is_consistent()
    );

    Ok(comparison)
}

/// Run the comparison and render its report to `out`
pub fn execute<W: Write>(config: &Config, out: &mut W) -> Result<Comparison> {
    let comparison = run_comparison(config)?;

    match &comparison {
        Comparison::Transfer(c) => PrettyPrinter::write_transfer_report(out, c)?,
        Comparison::View(c) => PrettyPrinter::write_view_report(out, c)?,
    }
    out.flush()?;

    Ok(comparison)
}
