//! The four stages of a run, in execution order.

pub mod classify;
pub mod dedup;
pub mod rename;
pub mod summary;

pub use classify::classify;
pub use dedup::{quality_outranks, select_best_per_title, BestVersion, BestVersions};
pub use rename::rename_folders;
pub use summary::{summarize, write_summary, RunSummary};
