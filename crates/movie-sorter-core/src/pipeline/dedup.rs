use crate::config::RunContext;
use crate::error::Result;
use crate::parser::NameParser;
use crate::progress::ProgressReporter;
use crate::report::{Action, RunReport, Stage};
use crate::scanner;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// The folder kept for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestVersion {
    pub quality: Option<String>,
    pub path: PathBuf,
}

/// Title -> kept folder, one entry per title, in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct BestVersions {
    entries: Vec<(String, BestVersion)>,
    index: HashMap<String, usize>,
}

impl BestVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<&BestVersion> {
        self.index.get(title).map(|&i| &self.entries[i].1)
    }

    /// Insert or replace. A replaced title keeps its original position.
    pub fn insert(&mut self, title: String, version: BestVersion) -> Option<BestVersion> {
        match self.index.get(&title) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, version)),
            None => {
                self.index.insert(title.clone(), self.entries.len());
                self.entries.push((title, version));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BestVersion)> {
        self.entries
            .iter()
            .map(|(title, version)| (title.as_str(), version))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `new` replaces `existing` as the kept version.
///
/// Plain string ordering, not numeric: `"720p" > "1080p"` because `'7' > '1'`, so a 720p
/// copy beats a 1080p copy. A missing quality never wins.
pub fn quality_outranks(new: Option<&str>, existing: Option<&str>) -> bool {
    match (new, existing) {
        (Some(_), None) => true,
        (Some(new), Some(existing)) => new > existing,
        (None, _) => false,
    }
}

/// Keep one folder per parsed title and delete the others recursively.
///
/// Folders whose names cannot be parsed are logged and left in place. Deletion failures
/// are recorded and the pass carries on.
pub fn select_best_per_title<P: NameParser + ?Sized>(
    ctx: &RunContext,
    parser: &P,
    reporter: &dyn ProgressReporter,
    report: &mut RunReport,
) -> Result<BestVersions> {
    let folders = scanner::list_movie_folders(ctx)?;
    let total = folders.len();
    reporter.on_stage_start(Stage::Dedup, total);

    let mut best_versions = BestVersions::new();

    for (index, folder) in folders.into_iter().enumerate() {
        match parser.parse(&folder.raw_name) {
            None => {
                error!("Could not identify a movie name for '{}'", folder.raw_name);
                report.skipped(Stage::Dedup, &folder.path, "unparsed name");
            }
            Some(parsed) => {
                let candidate = BestVersion {
                    quality: parsed.quality,
                    path: folder.path,
                };
                match best_versions.get(&parsed.title) {
                    None => {
                        report.success(Stage::Dedup, &candidate.path, Action::Kept);
                        best_versions.insert(parsed.title, candidate);
                    }
                    Some(existing)
                        if quality_outranks(
                            candidate.quality.as_deref(),
                            existing.quality.as_deref(),
                        ) =>
                    {
                        remove_folder(&existing.path, report);
                        report.success(Stage::Dedup, &candidate.path, Action::Kept);
                        best_versions.insert(parsed.title, candidate);
                    }
                    Some(_) => remove_folder(&candidate.path, report),
                }
            }
        }
        reporter.on_item_complete(Stage::Dedup, index + 1, total);
    }

    Ok(best_versions)
}

fn remove_folder(path: &Path, report: &mut RunReport) {
    match fs::remove_dir_all(path) {
        Ok(()) => report.success(Stage::Dedup, path, Action::Removed),
        Err(err) => report.failed(Stage::Dedup, path, err),
    }
}
