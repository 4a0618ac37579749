use crate::config::RunContext;
use crate::error::Result;
use crate::parser::{display_name, normalized_folder_name, NameParser};
use crate::progress::ProgressReporter;
use crate::report::{Action, RunReport, Stage};
use crate::scanner;
use std::fs;
use tracing::error;

/// Rename every movie folder to its normalized `Title 1999 1080p` form.
///
/// Names are parsed in display form (dashes read as spaces). Unparsable names and
/// renames that would clobber another entry are recorded and left alone.
pub fn rename_folders<P: NameParser + ?Sized>(
    ctx: &RunContext,
    parser: &P,
    reporter: &dyn ProgressReporter,
    report: &mut RunReport,
) -> Result<()> {
    let folders = scanner::list_movie_folders(ctx)?;
    let total = folders.len();
    reporter.on_stage_start(Stage::Rename, total);

    for (index, folder) in folders.iter().enumerate() {
        match parser.parse(&display_name(&folder.raw_name)) {
            None => {
                error!("Could not identify a movie name for '{}'", folder.raw_name);
                report.skipped(Stage::Rename, &folder.path, "unparsed name");
            }
            Some(parsed) => {
                let new_name = normalized_folder_name(&parsed);
                let new_path = ctx.root.join(&new_name);

                if new_name.is_empty() {
                    report.skipped(Stage::Rename, &folder.path, "normalized name is empty");
                } else if new_path == folder.path {
                    report.success(Stage::Rename, &folder.path, Action::Unchanged);
                } else if new_path.exists() {
                    report.failed(
                        Stage::Rename,
                        &folder.path,
                        format!("destination {} already exists", new_path.display()),
                    );
                } else {
                    match fs::rename(&folder.path, &new_path) {
                        Ok(()) => report.success(
                            Stage::Rename,
                            &folder.path,
                            Action::Renamed { to: new_path },
                        ),
                        Err(err) => report.failed(Stage::Rename, &folder.path, err),
                    }
                }
            }
        }
        reporter.on_item_complete(Stage::Rename, index + 1, total);
    }

    Ok(())
}
