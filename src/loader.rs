//! Loading dump directories into snapshots

use crate::error::{DumpDiffError, Result};
use crate::progress::ProgressReporter;
use crate::record::{RecordFormat, TransferRecord, ViewDump, ViewRecord};
use crate::snapshot::Snapshot;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file format that can be parsed into a per-file snapshot
pub trait DumpFormat {
    type Record: Clone;

    const FORMAT: RecordFormat;

    /// Parse the full text of one dump file
    fn parse(path: &Path, content: &str) -> Result<FileSnapshot<Self::Record>>;
}

/// `key,exp,flag,cas,rev,value` lines
pub struct TransferFormat;

impl DumpFormat for TransferFormat {
    type Record = TransferRecord;

    const FORMAT: RecordFormat = RecordFormat::Transfer;

    fn parse(path: &Path, content: &str) -> Result<FileSnapshot<TransferRecord>> {
        let mut snapshot = Snapshot::new();
        let mut lines_dropped = 0;

        for (line_no, line) in content.lines().enumerate() {
            match TransferRecord::parse_line(line) {
                Some((key, record)) => {
                    snapshot.insert(key, record);
                }
                None => {
                    log::debug!("{}:{}: dropped line with too few fields", path.display(), line_no + 1);
                    lines_dropped += 1;
                }
            }
        }

        Ok(FileSnapshot {
            path: path.to_path_buf(),
            snapshot,
            lines_dropped,
        })
    }
}

/// `{"rows": [{"key": ..., "value": ...}]}` documents
pub struct ViewFormat;

impl DumpFormat for ViewFormat {
    type Record = ViewRecord;

    const FORMAT: RecordFormat = RecordFormat::View;

    fn parse(path: &Path, content: &str) -> Result<FileSnapshot<ViewRecord>> {
        let dump: ViewDump = serde_json::from_str(content)
            .map_err(|e| DumpDiffError::parse(path, e.to_string()))?;

        let snapshot = dump
            .rows
            .into_iter()
            .map(|row| (row.key_text(), ViewRecord { revision: row.value }))
            .collect();

        Ok(FileSnapshot {
            path: path.to_path_buf(),
            snapshot,
            lines_dropped: 0,
        })
    }
}

/// Records read from a single file
#[derive(Debug, Clone)]
pub struct FileSnapshot<V> {
    pub path: PathBuf,
    pub snapshot: Snapshot<V>,
    /// Lines rejected for having too few fields (transfer dumps only)
    pub lines_dropped: usize,
}

/// Why a file contributed nothing to the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading one directory entry
#[derive(Debug, Clone)]
pub enum FileOutcome<V> {
    Loaded(FileSnapshot<V>),
    Skipped(FileFailure),
}

/// Per-file line of a load report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Record occurrences read, duplicates included
    pub records: usize,
    pub lines_dropped: usize,
}

/// Everything learned from loading one dump directory
#[derive(Debug, Clone)]
pub struct LoadReport<V> {
    pub directory: PathBuf,
    pub snapshot: Snapshot<V>,
    pub loaded: Vec<FileSummary>,
    pub skipped: Vec<FileFailure>,
}

impl<V> LoadReport<V> {
    /// Record occurrences read across all loaded files
    pub fn records_read(&self) -> usize {
        self.loaded.iter().map(|f| f.records).sum()
    }

    pub fn lines_dropped(&self) -> usize {
        self.loaded.iter().map(|f| f.lines_dropped).sum()
    }

    pub fn files_seen(&self) -> usize {
        self.loaded.len() + self.skipped.len()
    }
}

/// Loads every file of a dump directory
#[derive(Debug, Clone, Default)]
pub struct DumpLoader {
    show_progress: bool,
}

impl DumpLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load and merge every non-hidden entry directly under `dir`.
    ///
    /// Unreadable or malformed files are skipped and reported; only a failure
    /// to list the directory itself is an error.
    pub fn load_directory<F: DumpFormat>(&self, dir: &Path, label: &str) -> Result<LoadReport<F::Record>> {
        let entries = list_dump_files(dir)?;
        log::info!(
            "Analyzing {} directory {} ({} file(s), {} format)",
            label,
            dir.display(),
            entries.len(),
            F::FORMAT.name()
        );

        let mut progress = if self.show_progress {
            ProgressReporter::new_for_load(label, entries.len() as u64)
        } else {
            ProgressReporter::new_minimal()
        };

        let mut report = LoadReport {
            directory: dir.to_path_buf(),
            snapshot: Snapshot::new(),
            loaded: Vec::new(),
            skipped: Vec::new(),
        };

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(failure) => {
                    log::warn!("Skipping {}: {}", failure.path.display(), failure.reason);
                    report.skipped.push(failure);
                    progress.finish_file();
                    continue;
                }
            };
            progress.start_file(&path);
            match load_file::<F>(&path) {
                FileOutcome::Loaded(file) => {
                    let records = file.snapshot.total_occurrences();
                    log::info!("Analyzing file: {} ({} record(s) read)", path.display(), records);
                    report.loaded.push(FileSummary {
                        path: file.path,
                        records,
                        lines_dropped: file.lines_dropped,
                    });
                    report.snapshot.merge(file.snapshot);
                }
                FileOutcome::Skipped(failure) => {
                    log::warn!("Skipping {}: {}", failure.path.display(), failure.reason);
                    report.skipped.push(failure);
                }
            }
            progress.finish_file();
        }

        log::debug!("{} load took {:.2?}", label, progress.elapsed());
        progress.finish_load(&format!(
            "Loaded {} {} record(s) from {} file(s)",
            report.snapshot.len(),
            label,
            report.loaded.len()
        ));
        log::info!("Total {} records: {}", label, report.snapshot.len());

        Ok(report)
    }
}

/// Read and parse a single file, converting every failure into a skip
pub fn load_file<F: DumpFormat>(path: &Path) -> FileOutcome<F::Record> {
    let skipped = |reason: String| {
        FileOutcome::Skipped(FileFailure {
            path: path.to_path_buf(),
            reason,
        })
    };

    // Follows symlinks, so a dangling link fails here
    match fs::metadata(path) {
        Ok(metadata) if !metadata.is_file() => return skipped("not a regular file".to_string()),
        Ok(_) => {}
        Err(e) => return skipped(e.to_string()),
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return skipped(e.to_string()),
    };
    let content = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = content {
        log::warn!("{} contains invalid UTF-8, affected bytes replaced", path.display());
    }

    match F::parse(path, &content) {
        Ok(file) => FileOutcome::Loaded(file),
        Err(DumpDiffError::Parse { message, .. }) => skipped(message),
        Err(e) => skipped(e.to_string()),
    }
}

/// A listed directory entry, or the reason it could not be listed
pub type ListedEntry = std::result::Result<PathBuf, FileFailure>;

/// Non-hidden entries directly under `dir`, in file name order.
///
/// Entries that cannot be inspected come back as failures so the caller can
/// skip them; only a failure to read `dir` itself is an error.
pub fn list_dump_files(dir: &Path) -> Result<Vec<ListedEntry>> {
    if !dir.is_dir() {
        return Err(DumpDiffError::invalid_input(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if !is_hidden(entry.path()) {
                    entries.push(Ok(entry.into_path()));
                }
            }
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                if !is_hidden(&path) {
                    entries.push(Err(FileFailure {
                        path,
                        reason: e.to_string(),
                    }));
                }
            }
        }
    }

    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
