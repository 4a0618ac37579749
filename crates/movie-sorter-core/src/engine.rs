use crate::config::RunContext;
use crate::error::Result;
use crate::metadata::MetadataClient;
use crate::parser::NameParser;
use crate::pipeline::{self, RunSummary};
use crate::progress::ProgressReporter;
use crate::report::{RunReport, Stage};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Organizer<P, C> {
    context: RunContext,
    parser: P,
    client: C,
}

#[derive(Debug)]
pub struct RunResult {
    pub rename_duration: Duration,
    pub dedup_duration: Duration,
    pub classify_duration: Duration,
    pub titles: usize,
    pub summary: RunSummary,
    pub summary_path: PathBuf,
    pub report: RunReport,
}

impl<P: NameParser, C: MetadataClient> Organizer<P, C> {
    pub fn new(context: RunContext, parser: P, client: C) -> Self {
        Self {
            context,
            parser,
            client,
        }
    }

    /// Run the full organize pipeline:
    /// 1. Rename folders to `Title 1999 1080p`
    /// 2. Keep the best version of each title, delete the rest
    /// 3. Look each title up and move it into its genre bucket
    /// 4. Write `process_summary.txt`
    ///
    /// Per-folder problems end up in the returned report. Only an unreadable root or an
    /// unwritable summary fails the run.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunResult> {
        let ctx = &self.context;
        let mut report = RunReport::new();
        info!("Organizing movies in {}", ctx.root.display());

        // Phase 1: Rename
        info!("Renaming folders...");
        let start = Instant::now();
        pipeline::rename_folders(ctx, &self.parser, reporter, &mut report)?;
        let rename_duration = start.elapsed();
        reporter.on_stage_complete(Stage::Rename, rename_duration.as_secs_f64());

        // Phase 2: Dedup
        info!("Keeping the best version of each movie...");
        let start = Instant::now();
        let best_versions =
            pipeline::select_best_per_title(ctx, &self.parser, reporter, &mut report)?;
        let dedup_duration = start.elapsed();
        reporter.on_stage_complete(Stage::Dedup, dedup_duration.as_secs_f64());
        debug!(
            "Dedup completed in {:.2}s, {} distinct titles",
            dedup_duration.as_secs_f64(),
            best_versions.len()
        );

        // Phase 3: Classify
        info!("Classifying {} movies by genre...", best_versions.len());
        let start = Instant::now();
        pipeline::classify(ctx, &best_versions, &self.client, reporter, &mut report);
        let classify_duration = start.elapsed();
        reporter.on_stage_complete(Stage::Classify, classify_duration.as_secs_f64());

        // Phase 4: Summary
        let summary = pipeline::summarize(&ctx.root)?;
        let summary_path = pipeline::write_summary(&ctx.root, &summary)?;
        info!(path = %summary_path.display(), "{}", summary);

        Ok(RunResult {
            rename_duration,
            dedup_duration,
            classify_duration,
            titles: best_versions.len(),
            summary,
            summary_path,
            report,
        })
    }
}
