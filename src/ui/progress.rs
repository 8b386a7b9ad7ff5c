//! Progress reporting

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::path::Path;
use std::time::Instant;

/// Progress reporter for a copy run
pub struct ProgressReporter {
    bar: ProgressBar,
    started_at: Instant,
    copied_files: Cell<u64>,
    copied_bytes: Cell<u64>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self::with_bar(bar)
    }

    /// Reporter that never draws (tests, non-interactive callers)
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }

        Self {
            bar,
            started_at: Instant::now(),
            copied_files: Cell::new(0),
            copied_bytes: Cell::new(0),
        }
    }

    /// Set the number of tasks in this run.
    pub fn start(&mut self, total_tasks: u64) {
        self.started_at = Instant::now();
        self.copied_files.set(0);
        self.copied_bytes.set(0);
        self.bar.set_length(total_tasks);
        self.bar.set_position(0);
    }

    /// Show which task is running.
    pub fn start_task(&self, index: usize, src: &Path) {
        self.bar
            .set_message(format!("Task {}: {}", index, src.display()));
    }

    /// Record one copied file.
    pub fn file_copied(&self, path: &Path, bytes: u64) {
        self.copied_files.set(self.copied_files.get() + 1);
        self.copied_bytes
            .set(self.copied_bytes.get().saturating_add(bytes));
        self.bar.set_message(format!(
            "{} files | {} | {}",
            self.copied_files.get(),
            HumanBytes(self.copied_bytes.get()),
            path.display()
        ));
    }

    /// Mark the current task finished (copied or skipped).
    pub fn finish_task(&self) {
        self.bar.inc(1);
    }

    /// Finalize with a summary line.
    pub fn finish(&self, completed: usize, skipped: usize) {
        self.bar.finish_with_message(format!(
            "{} tasks copied, {} skipped | {} files | {} in {:.1?}",
            completed,
            skipped,
            self.copied_files.get(),
            HumanBytes(self.copied_bytes.get()),
            self.started_at.elapsed()
        ));
    }

    /// Hide the bar while `f` writes to the terminal (log lines).
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Stop drawing without a summary (fatal error path).
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    pub fn copied_files(&self) -> u64 {
        self.copied_files.get()
    }

    pub fn copied_bytes(&self) -> u64 {
        self.copied_bytes.get()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
