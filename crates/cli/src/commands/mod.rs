pub mod configs;
pub mod run;
pub mod simulate;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use popsimu_sim::storage::{RecorderStats, ResultRecorder};
use popsimu_sim::sweep::{run_jobs, Job, RunSettings};
use std::path::Path;

/// Run `jobs` on the worker pool and append every result to `output`.
///
/// The output file is created before the first job starts and closed on every
/// exit path, including a failed write.
pub(crate) fn execute(
    jobs: Vec<Job>,
    settings: &RunSettings,
    output: &Path,
    progress: bool,
) -> Result<RecorderStats> {
    let mut recorder = ResultRecorder::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;

    let pb = job_progress(jobs.len() as u64, progress);
    let outcome = run_jobs(jobs, settings, |result| {
        recorder
            .record(&result)
            .with_context(|| format!("Failed to write result to {}", output.display()))?;
        pb.inc(1);
        Ok(())
    });

    match outcome {
        Ok(_) => pb.finish_with_message("Done"),
        Err(_) => pb.abandon_with_message("Aborted"),
    }
    outcome.map(|_| recorder.stats())
}

fn job_progress(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} jobs ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
