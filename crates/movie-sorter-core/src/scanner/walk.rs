use crate::config::RunContext;
use crate::taxonomy;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, trace};

/// A top-level directory of the root, as seen by one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub path: PathBuf,
    pub raw_name: String,
}

/// Every top-level directory of `root`, in listing order. Files are ignored.
///
/// An unreadable root is an error; an unreadable entry is logged and skipped.
pub fn list_directories(root: &Path) -> io::Result<Vec<FolderEntry>> {
    let entries = fs::read_dir(root).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading directory {}: {}", root.display(), err),
        )
    })?;

    let mut folders = Vec::new();
    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                error!("Error reading entry in directory {}: {}", root.display(), err);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        folders.push(FolderEntry {
            raw_name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }

    Ok(folders)
}

/// Movie folders only: buckets and ignored names are left out.
pub fn list_movie_folders(ctx: &RunContext) -> io::Result<Vec<FolderEntry>> {
    let folders = list_directories(&ctx.root)?
        .into_iter()
        .filter(|folder| {
            if taxonomy::is_bucket(&folder.raw_name) {
                return false;
            }
            if ctx.is_ignored(&folder.raw_name) {
                trace!("Ignoring {}", folder.path.display());
                return false;
            }
            true
        })
        .collect();
    Ok(folders)
}
