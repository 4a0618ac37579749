use crate::error::Result;
use crate::scanner;
use crate::taxonomy::{MANUAL_CHECKING, SUMMARY_FILE};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries inside `Manual Checking`.
    pub manual_count: usize,
    /// Every top-level directory of the root, buckets included.
    pub total_count: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} movies are in '{}'",
            self.manual_count, self.total_count, MANUAL_CHECKING
        )
    }
}

/// Count the current state of `root`.
///
/// `total_count` includes the genre and reserved buckets themselves, not only movie
/// folders.
pub fn summarize(root: &Path) -> Result<RunSummary> {
    let manual_checking = root.join(MANUAL_CHECKING);
    let manual_count = if manual_checking.is_dir() {
        fs::read_dir(&manual_checking)?.count()
    } else {
        0
    };

    let total_count = scanner::list_directories(root)?.len();

    Ok(RunSummary {
        manual_count,
        total_count,
    })
}

/// Write the one-line summary to `<root>/process_summary.txt`.
pub fn write_summary(root: &Path, summary: &RunSummary) -> Result<PathBuf> {
    let path = root.join(SUMMARY_FILE);
    fs::write(&path, format!("{}\n", summary))?;
    Ok(path)
}
