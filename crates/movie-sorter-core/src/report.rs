//! Per-item results of every pipeline stage.
//!
//! Stages never abort on a single bad folder. Each item ends up as a success, a skip or a
//! failure; the entry is logged when recorded and kept in the [`RunReport`] for the final
//! tally.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Rename,
    Dedup,
    Classify,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Rename => "rename",
            Stage::Dedup => "dedup",
            Stage::Classify => "classify",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Renamed { to: PathBuf },
    Unchanged,
    Kept,
    Removed,
    Moved { to: PathBuf },
    InfoSaved { path: PathBuf },
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Action),
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub stage: Stage,
    pub item: PathBuf,
    pub outcome: Outcome,
}

impl ItemReport {
    fn log(&self) {
        let stage = self.stage;
        let item = self.item.display();
        match &self.outcome {
            Outcome::Success(Action::Renamed { to }) => {
                info!(%stage, from = %item, to = %to.display(), "renamed")
            }
            Outcome::Success(Action::Removed) => info!(%stage, path = %item, "removed"),
            Outcome::Success(Action::Moved { to }) => {
                info!(%stage, from = %item, to = %to.display(), "moved")
            }
            Outcome::Success(Action::InfoSaved { path }) => {
                info!(%stage, title = %item, saved_info = %path.display(), "saved info")
            }
            Outcome::Success(Action::Created) => debug!(%stage, path = %item, "created"),
            Outcome::Success(action) => debug!(%stage, path = %item, ?action),
            Outcome::Skipped(reason) => debug!(%stage, path = %item, %reason, "skipped"),
            Outcome::Failed(reason) => error!(%stage, path = %item, error = %reason),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RunReport {
    items: Vec<ItemReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, item: impl AsRef<Path>, outcome: Outcome) {
        let entry = ItemReport {
            stage,
            item: item.as_ref().to_path_buf(),
            outcome,
        };
        entry.log();
        self.items.push(entry);
    }

    pub fn success(&mut self, stage: Stage, item: impl AsRef<Path>, action: Action) {
        self.record(stage, item, Outcome::Success(action));
    }

    pub fn skipped(&mut self, stage: Stage, item: impl AsRef<Path>, reason: impl Into<String>) {
        self.record(stage, item, Outcome::Skipped(reason.into()));
    }

    pub fn failed(&mut self, stage: Stage, item: impl AsRef<Path>, reason: impl ToString) {
        self.record(stage, item, Outcome::Failed(reason.to_string()));
    }

    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(move |entry| entry.stage == stage)
    }

    pub fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.items
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Success(Action::Renamed { .. })))
    }

    /// Duplicate folders deleted. Pruned empty buckets are not counted.
    pub fn removed(&self) -> usize {
        self.for_stage(Stage::Dedup)
            .filter(|entry| matches!(entry.outcome, Outcome::Success(Action::Removed)))
            .count()
    }

    pub fn moved(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Success(Action::Moved { .. })))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_outcome() {
        let mut report = RunReport::new();
        report.success(
            Stage::Rename,
            "/m/Heat.1995.720p",
            Action::Renamed {
                to: PathBuf::from("/m/Heat 720p"),
            },
        );
        report.success(Stage::Dedup, "/m/Heat 1080p", Action::Removed);
        report.skipped(Stage::Dedup, "/m/___", "unparsed");
        report.failed(Stage::Classify, "/m/Heat 720p", "permission denied");

        assert_eq!(report.items().len(), 4);
        assert_eq!(report.renamed(), 1);
        assert_eq!(report.removed(), 1);
        assert_eq!(report.moved(), 0);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.for_stage(Stage::Dedup).count(), 2);

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.stage, Stage::Classify);
        assert_eq!(
            failure.outcome,
            Outcome::Failed("permission denied".to_string())
        );
    }
}
