//! Epoch and batch progress display

use crate::io::configuration::{PROGRESS_BAR_WIDTH, SWEEP_REPORT_INTERVAL};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static EPOCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] epoch {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display while inpainting one or more files
///
/// A batch bar is shown only when more than one file is processed; each file
/// gets an epoch bar whose message tracks the position within the sweep.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    epoch_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            epoch_bar: None,
        }
    }

    /// Prepare the batch bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start the epoch bar for a file
    pub fn start_file(&mut self, path: &Path, epochs: usize) {
        if let Some(previous) = self.epoch_bar.take() {
            previous.finish_and_clear();
        }

        let bar = ProgressBar::new(epochs as u64);
        bar.set_style(EPOCH_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.epoch_bar = Some(self.multi_progress.add(bar));
    }

    /// Report the sweep position within the running epoch
    ///
    /// Updates are throttled to every `SWEEP_REPORT_INTERVAL` nodes and the
    /// last node of the sweep.
    pub fn update_sweep(&self, position: usize, total: usize) {
        if position % SWEEP_REPORT_INTERVAL != 0 && position != total {
            return;
        }
        if let Some(bar) = &self.epoch_bar {
            let width = total.to_string().len();
            bar.set_message(format!("node {position:>width$}/{total}"));
        }
    }

    /// Mark one more epoch as complete
    pub fn complete_epoch(&self) {
        if let Some(bar) = &self.epoch_bar {
            bar.inc(1);
        }
    }

    /// Mark the current file as done
    pub fn complete_file(&mut self, elapsed: Duration) {
        if let Some(bar) = self.epoch_bar.take() {
            bar.finish_with_message(format!("✓ {:.1}s", elapsed.as_secs_f64()));
        }
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
