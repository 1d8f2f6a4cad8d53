//! Output formatting utilities

use crate::commands::{TransferComparison, ViewComparison};
use crate::diff::DiffSummary;
use crate::loader::LoadReport;
use crate::replica::ReplicaAnomalies;
use indexmap::IndexMap;
use std::fmt::Display;
use std::io::{self, Write};

const BANNER: &str = "++++++++++++++++++++++++++++++++++++++++++++++++++++++++++";
const DIVIDER: &str = "----------------------------------------------------------";

/// Pretty printer for dumpdiff reports
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Write the three-section report for transfer dumps
    pub fn write_transfer_report<W: Write>(out: &mut W, comparison: &TransferComparison) -> io::Result<()> {
        Self::write_header(out, &comparison.source, &comparison.target)?;

        writeln!(out, "1) Difference between Source and Target Keys")?;
        Self::write_entries(out, &comparison.diff.only_in_first)?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "2) Difference between Target and Source Keys")?;
        Self::write_entries(out, &comparison.diff.only_in_second)?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "3) Change Value Analysis for same Keys")?;
        for (key, diff) in &comparison.diff.changed {
            writeln!(out, "   For Key :: {}", key)?;
            for (i, change) in diff.changes.iter().enumerate() {
                let prefix = if i == diff.changes.len() - 1 { "└─" } else { "├─" };
                writeln!(
                    out,
                    "   {} {} :: {} changes to {}",
                    prefix,
                    change.field.label(),
                    change.before,
                    change.after
                )?;
            }
        }
        Self::write_case_count(out, comparison.diff.changed.len())?;
        Self::write_diff_totals(out, comparison.diff.summary())?;

        Ok(())
    }

    /// Write the five-section report for view dumps
    pub fn write_view_report<W: Write>(out: &mut W, comparison: &ViewComparison) -> io::Result<()> {
        Self::write_header(out, &comparison.source, &comparison.target)?;

        writeln!(out, "1) Difference between Source and Target Keys")?;
        Self::write_entries(out, &comparison.diff.only_in_first)?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "2) Difference between Target and Source Keys")?;
        Self::write_entries(out, &comparison.diff.only_in_second)?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "3) Change Value Analysis for same Keys")?;
        for (key, change) in &comparison.diff.changed {
            writeln!(out, "   For Key :: {}", key)?;
            writeln!(out, "   └─ Value :: {} changes to {}", change.before, change.after)?;
        }
        Self::write_case_count(out, comparison.diff.changed.len())?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "4) Source Replica Count Issues")?;
        Self::write_replicas(out, &comparison.source_replicas)?;
        writeln!(out, "{}", DIVIDER)?;

        writeln!(out, "5) Target Replica Count Issues")?;
        Self::write_replicas(out, &comparison.target_replicas)?;
        Self::write_diff_totals(out, comparison.diff.summary())?;

        Ok(())
    }

    fn write_header<W: Write, V>(out: &mut W, source: &LoadReport<V>, target: &LoadReport<V>) -> io::Result<()> {
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "Analysis of Source and Target Directory Comparison Results")?;
        writeln!(out, "{}", BANNER)?;
        Self::write_load_summary(out, "Source", source, false)?;
        Self::write_load_summary(out, "Target", target, true)?;
        writeln!(out, "{}", BANNER)?;
        Ok(())
    }

    fn write_load_summary<W: Write, V>(out: &mut W, label: &str, report: &LoadReport<V>, last: bool) -> io::Result<()> {
        let (prefix, child) = if last { ("└─", "   ") } else { ("├─", "│  ") };
        writeln!(out, "{} {}: {}", prefix, label, report.directory.display())?;
        writeln!(
            out,
            "{}├─ Files read: {} of {}",
            child,
            report.loaded.len(),
            report.files_seen()
        )?;
        writeln!(out, "{}├─ Record(s) read: {}", child, report.records_read())?;
        if report.lines_dropped() > 0 {
            writeln!(out, "{}├─ Short lines dropped: {}", child, report.lines_dropped())?;
        }
        for failure in &report.skipped {
            writeln!(
                out,
                "{}├─ ⚠️ Skipped {}: {}",
                child,
                failure.path.display(),
                failure.reason
            )?;
        }
        writeln!(out, "{}└─ Total {} records: {}", child, label, report.snapshot.len())?;
        Ok(())
    }

    fn write_entries<W: Write, V: Display>(out: &mut W, entries: &IndexMap<String, V>) -> io::Result<()> {
        for (key, value) in entries {
            writeln!(out, "   Key :: {} :: {}", key, value)?;
        }
        Self::write_case_count(out, entries.len())
    }

    fn write_replicas<W: Write>(out: &mut W, anomalies: &ReplicaAnomalies) -> io::Result<()> {
        let under: Vec<(&String, &usize)> = anomalies.under_replicated().collect();
        let over: Vec<(&String, &usize)> = anomalies.over_replicated().collect();

        writeln!(out, "   ├─ Under-replicated: {}", under.len())?;
        for (key, count) in under {
            Self::write_replica_key(out, "│  ", key, *count, anomalies.expected)?;
        }
        writeln!(out, "   └─ Over-replicated: {}", over.len())?;
        for (key, count) in over {
            Self::write_replica_key(out, "   ", key, *count, anomalies.expected)?;
        }
        Self::write_case_count(out, anomalies.len())
    }

    fn write_replica_key<W: Write>(out: &mut W, prefix: &str, key: &str, count: usize, expected: usize) -> io::Result<()> {
        writeln!(
            out,
            "   {}   Key :: {} :: seen {} time(s), expected {}",
            prefix, key, count, expected
        )
    }

    fn write_diff_totals<W: Write>(out: &mut W, summary: DiffSummary) -> io::Result<()> {
        writeln!(out, "{}", BANNER)?;
        writeln!(
            out,
            "Total key differences :: {} ({} source only, {} target only, {} changed)",
            summary.total(),
            summary.only_in_first,
            summary.only_in_second,
            summary.changed
        )
    }

    fn write_case_count<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
        writeln!(out, "number of such cases :: {}", count)
    }
}
