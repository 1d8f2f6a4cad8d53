//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for loading a dump directory
#[derive(Debug)]
pub struct ProgressReporter {
    files_pb: Option<ProgressBar>,
    start_time: std::time::Instant,
}

impl ProgressReporter {
    /// Create progress reporter for a directory load
    pub fn new_for_load(label: &str, total_files: u64) -> Self {
        let pb = create_progress_bar(total_files, &format!("Loading {} dump", label));
        Self {
            files_pb: Some(pb),
            start_time: std::time::Instant::now(),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            files_pb: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Show which file is being read
    pub fn start_file(&mut self, path: &Path) {
        if let Some(pb) = &self.files_pb {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            pb.set_message(name);
        }
    }

    pub fn finish_file(&mut self) {
        if let Some(pb) = &self.files_pb {
            pb.inc(1);
        }
    }

    /// Finish the load with a summary message
    pub fn finish_load(&mut self, message: &str) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_with_message(format!(
                "{} in {:.2?}",
                message,
                self.start_time.elapsed()
            ));
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with consistent styling
fn create_progress_bar(total: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
