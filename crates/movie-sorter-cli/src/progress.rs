use indicatif::{ProgressBar, ProgressStyle};
use movie_sorter_core::{ProgressReporter, Stage};
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter using one indicatif bar per stage.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Rename => "Renaming",
        Stage::Dedup => "Deduplicating",
        Stage::Classify => "Classifying",
        Stage::Cleanup => "Cleaning up",
    }
}

impl ProgressReporter for CliReporter {
    fn on_stage_start(&self, stage: Stage, total: usize) {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "  {spinner:.cyan} {prefix} [{bar:30.cyan/dim}] {pos}/{len} ({percent}%)",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸─")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.set_prefix(stage_label(stage));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_item_complete(&self, _stage: Stage, done: usize, total: usize) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                if pb.length() != Some(total as u64) {
                    pb.set_length(total as u64);
                }
                pb.set_position(done as u64);
            }
        }
    }

    fn on_stage_complete(&self, stage: Stage, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m {} complete in {:.2}s",
            stage_label(stage),
            duration_secs
        );
    }
}
