//! Validated run configuration

use crate::cli::{Cli, CompareMode};
use crate::error::{DumpDiffError, Result};
use std::path::PathBuf;

/// Settings for one comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source dump directory
    pub source: PathBuf,
    /// Target dump directory
    pub target: PathBuf,
    pub mode: CompareMode,
    /// Expected occurrences of each source key (view mode)
    pub source_replicas: usize,
    /// Expected occurrences of each target key (view mode)
    pub target_replicas: usize,
    pub show_progress: bool,
}

impl Config {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>, mode: CompareMode) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            mode,
            source_replicas: 1,
            target_replicas: 1,
            show_progress: false,
        }
    }

    pub fn with_replicas(mut self, source: usize, target: usize) -> Self {
        self.source_replicas = source;
        self.target_replicas = target;
        self
    }

    /// Check that both dump directories exist
    pub fn validate(&self) -> Result<()> {
        for (label, dir) in [("Source", &self.source), ("Target", &self.target)] {
            if !dir.exists() {
                return Err(DumpDiffError::config(format!(
                    "{} directory does not exist: {}",
                    label,
                    dir.display()
                )));
            }
            if !dir.is_dir() {
                return Err(DumpDiffError::config(format!(
                    "{} path is not a directory: {}",
                    label,
                    dir.display()
                )));
            }
        }

        if self.source_replicas == 0 || self.target_replicas == 0 {
            return Err(DumpDiffError::config("Replica count must be greater than 0"));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = DumpDiffError;

    fn try_from(cli: Cli) -> Result<Self> {
        let config = Config {
            source: cli.src,
            target: cli.tgt,
            mode: cli.mode,
            source_replicas: cli.src_count,
            target_replicas: cli.count,
            show_progress: !cli.no_progress,
        };
        config.validate()?;
        Ok(config)
    }
}
