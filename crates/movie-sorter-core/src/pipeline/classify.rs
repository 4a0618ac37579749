use super::dedup::BestVersions;
use crate::config::RunContext;
use crate::metadata::{MetadataClient, MetadataRecord};
use crate::parser::sanitize_filename;
use crate::progress::ProgressReporter;
use crate::report::{Action, RunReport, Stage};
use crate::taxonomy::{self, GENRES, MANUAL_CHECKING, MOVIES_INFO};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::Path;

/// Route every kept folder into its genre bucket, or `Manual Checking` when the lookup
/// misses or the main genre is outside the taxonomy.
///
/// Every found record is saved under `movies info/`. Genre buckets are created up front
/// and the empty ones removed at the end.
pub fn classify<C: MetadataClient + ?Sized>(
    ctx: &RunContext,
    best_versions: &BestVersions,
    client: &C,
    reporter: &dyn ProgressReporter,
    report: &mut RunReport,
) {
    let root = &ctx.root;
    create_buckets(root, report);

    let manual_checking = root.join(MANUAL_CHECKING);
    let movies_info = root.join(MOVIES_INFO);

    let total = best_versions.len();
    reporter.on_stage_start(Stage::Classify, total);

    for (index, (title, version)) in best_versions.iter().enumerate() {
        match client.lookup(title) {
            Some(record) => {
                let bucket = match record.main_genre() {
                    Some(genre) if taxonomy::is_genre(genre) => root.join(genre),
                    _ => manual_checking.clone(),
                };
                move_into(&version.path, &bucket, report);
                save_movie_info(&record, title, &movies_info, report);
            }
            None => move_into(&version.path, &manual_checking, report),
        }
        reporter.on_item_complete(Stage::Classify, index + 1, total);
    }

    prune_empty_buckets(root, report);
}

fn create_buckets(root: &Path, report: &mut RunReport) {
    let names = GENRES
        .iter()
        .copied()
        .chain([MANUAL_CHECKING, MOVIES_INFO]);
    for name in names {
        let path = root.join(name);
        if path.exists() {
            continue;
        }
        match fs::create_dir_all(&path) {
            Ok(()) => report.success(Stage::Classify, &path, Action::Created),
            Err(err) => report.failed(Stage::Classify, &path, err),
        }
    }
}

fn move_into(path: &Path, bucket: &Path, report: &mut RunReport) {
    let Some(folder_name) = path.file_name() else {
        report.failed(Stage::Classify, path, "path has no folder name");
        return;
    };

    let destination = bucket.join(folder_name);
    if destination == path {
        report.skipped(Stage::Classify, path, "already in place");
        return;
    }

    match fs::rename(path, &destination) {
        Ok(()) => report.success(Stage::Classify, path, Action::Moved { to: destination }),
        Err(err) => report.failed(Stage::Classify, path, err),
    }
}

/// File name of the saved metadata for a record, `<Sanitized Title>_about.txt`.
pub fn info_file_name(record: &MetadataRecord, looked_up_title: &str) -> String {
    let mut title = sanitize_filename(&record.title);
    if title.is_empty() {
        title = sanitize_filename(looked_up_title);
    }
    format!("{}_about.txt", title)
}

fn save_movie_info(
    record: &MetadataRecord,
    looked_up_title: &str,
    movies_info: &Path,
    report: &mut RunReport,
) {
    let path = movies_info.join(info_file_name(record, looked_up_title));
    match write_pretty_json(record, &path) {
        Ok(()) => report.success(Stage::Classify, looked_up_title, Action::InfoSaved { path }),
        Err(err) => report.failed(Stage::Classify, &path, err),
    }
}

fn write_pretty_json(record: &MetadataRecord, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    record.serialize(&mut serializer)?;
    fs::write(path, buffer)
}

fn prune_empty_buckets(root: &Path, report: &mut RunReport) {
    for genre in GENRES {
        let path = root.join(genre);
        let is_empty = match fs::read_dir(&path) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => continue,
        };
        if !is_empty {
            continue;
        }
        match fs::remove_dir(&path) {
            Ok(()) => report.success(Stage::Cleanup, &path, Action::Removed),
            Err(err) => report.failed(Stage::Cleanup, &path, err),
        }
    }
}
