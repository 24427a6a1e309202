//! Batch command implementation.
//!
//! Runs several bar jobs against one cleaned tick set. The ticks are loaded
//! once and shared read-only; each job aggregates on the blocking pool and
//! writes its own file, so one failing job never stops the others.

use crate::display::{Format, prepare_ticks, write_bars_file};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tickbar_lib::prelude::*;

/// A set of bar jobs sharing one data directory.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchPlan {
    /// Session filter applied to the shared tick set.
    #[serde(default)]
    session: Option<TradingSession>,
    jobs: Vec<BarJob>,
}

/// One bar series to produce.
///
/// Interval and range stay as text here so that a bad value fails only its
/// own job.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BarJob {
    name: String,
    interval: String,
    start: String,
    end: String,
    #[serde(default)]
    format: Option<OutputFormat>,
}

/// What a finished job produced.
#[derive(Debug)]
struct JobOutcome {
    bars: usize,
    path: PathBuf,
}

/// Reads and validates a plan file.
fn read_plan(path: &Path) -> Result<BatchPlan> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    let plan: BatchPlan = serde_json::from_str(&text)
        .with_context(|| format!("Invalid plan {}", path.display()))?;

    if plan.jobs.is_empty() {
        anyhow::bail!("Plan {} contains no jobs", path.display());
    }
    for job in &plan.jobs {
        validate_job_name(&job.name)?;
    }
    Ok(plan)
}

/// Job names become file stems inside the output directory.
fn validate_job_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.chars().any(|c| c == '/' || c == '\\' || std::path::is_separator(c));
    if invalid {
        anyhow::bail!("Invalid job name '{name}': must be a plain file name");
    }
    Ok(())
}

/// Aggregates and writes a single job. Runs on the blocking pool.
fn run_job(
    job: &BarJob,
    ticks: &[Tick],
    output_dir: &Path,
    default_format: OutputFormat,
) -> Result<JobOutcome> {
    let interval: Interval = job
        .interval
        .parse()
        .with_context(|| format!("Invalid interval: {}", job.interval))?;
    let range = TimeRange::parse(&job.start, &job.end).context("Invalid time range")?;
    let format = job.format.unwrap_or(default_format);

    let bars = aggregate(ticks, interval, range)?;
    let path = output_dir.join(format!("{}.{}", job.name, format.extension()));
    write_bars_file(&bars, &path, format)?;

    tracing::info!(job = %job.name, %interval, bars = bars.len(), path = %path.display(), "job finished");
    Ok(JobOutcome {
        bars: bars.len(),
        path,
    })
}

/// Execute the batch command.
pub(crate) async fn batch(
    data_dir: &Path,
    plan_path: &Path,
    output_dir: PathBuf,
    format: Format,
    parallel: usize,
    quiet: bool,
) -> Result<()> {
    let plan = read_plan(plan_path)?;

    let ticks: Arc<[Tick]> = prepare_ticks(data_dir, plan.session, quiet)?.ticks.into();

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let default_format = OutputFormat::from(format);
    let multi_progress = if quiet {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    };

    let results: Vec<(String, Result<JobOutcome>)> = stream::iter(plan.jobs)
        .map(|job| {
            let pb = multi_progress.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix:.bold} {spinner:.green} {msg}")
                    .expect("Invalid progress template"),
            );
            pb.set_prefix(format!("{:>10}", job.name));
            pb.set_message("aggregating");
            pb.enable_steady_tick(Duration::from_millis(100));

            let ticks = Arc::clone(&ticks);
            let output_dir = output_dir.clone();

            async move {
                let name = job.name.clone();
                let result = tokio::task::spawn_blocking(move || {
                    run_job(&job, &ticks, &output_dir, default_format)
                })
                .await
                .context("Job panicked")
                .and_then(|r| r);

                match &result {
                    Ok(outcome) => pb.finish_with_message(format!(
                        "{} bars -> {}",
                        outcome.bars,
                        outcome.path.display()
                    )),
                    Err(e) => {
                        tracing::warn!(job = %name, "job failed: {e:#}");
                        pb.abandon_with_message(format!("failed: {e:#}"));
                    }
                }
                (name, result)
            }
        })
        .buffer_unordered(parallel.max(1))
        .collect()
        .await;

    // Report summary
    let (successes, failures): (Vec<_>, Vec<_>) =
        results.iter().partition(|(_, result)| result.is_ok());

    if !quiet {
        println!("\nBatch complete:");
        println!("  Successful: {}", successes.len());
        if !failures.is_empty() {
            println!("  Failed: {}", failures.len());
            for (name, result) in &failures {
                if let Err(e) = result {
                    println!("    {name}: {e:#}");
                }
            }
        }
    }

    // Return error if any jobs failed
    if !failures.is_empty() {
        anyhow::bail!(
            "{} out of {} jobs failed",
            failures.len(),
            successes.len() + failures.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn write_file(path: &Path, lines: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    #[test]
    fn test_plan_parsing() {
        let plan: BatchPlan = serde_json::from_str(
            r#"{
                "session": "09:30-16:00",
                "jobs": [
                    {"name": "Hour", "interval": "1h", "start": "2024-09-16 09:30:00", "end": "2024-09-17 16:00:00"},
                    {"name": "Minute", "interval": "1m", "start": "2024-09-16 09:30:00", "end": "2024-09-17 16:00:00", "format": "jsonl"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(plan.session, Some(TradingSession::default()));
        assert_eq!(plan.jobs.len(), 2);
        assert_eq!(plan.jobs[0].format, None);
        assert_eq!(plan.jobs[1].format, Some(OutputFormat::Ndjson));
    }

    #[test]
    fn test_read_plan_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        write_file(&path, &[r#"{"jobs": []}"#]);
        assert!(read_plan(&path).is_err());
    }

    #[test]
    fn test_read_plan_rejects_path_like_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");

        for name in ["../escape", "nested/Hour", "..", ""] {
            write_file(
                &path,
                &[&format!(
                    r#"{{"jobs": [{{"name": "{name}", "interval": "1h", "start": "2024-09-16 09:30:00", "end": "2024-09-16 16:00:00"}}]}}"#
                )],
            );
            assert!(read_plan(&path).is_err(), "accepted job name {name:?}");
        }

        write_file(
            &path,
            &[r#"{"jobs": [{"name": "Hour.v2", "interval": "1h", "start": "2024-09-16 09:30:00", "end": "2024-09-16 16:00:00"}]}"#],
        );
        assert!(read_plan(&path).is_ok());
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir(&data).unwrap();
        write_file(
            &data.join("ticks.csv"),
            &[
                "Timestamp,Price,Size",
                "2024-09-16 09:30:10.000,100.0,10",
                "2024-09-16 10:15:00.000,102.0,4",
            ],
        );

        let plan = dir.path().join("plan.json");
        write_file(
            &plan,
            &[r#"{"jobs": [
                {"name": "Hour", "interval": "1h", "start": "2024-09-16 09:30:00", "end": "2024-09-16 16:00:00"},
                {"name": "Broken", "interval": "soon", "start": "2024-09-16 09:30:00", "end": "2024-09-16 16:00:00"}
            ]}"#],
        );

        let out = dir.path().join("out");
        let result = batch(&data, &plan, out.clone(), Format::Csv, 2, true).await;

        assert!(result.is_err());
        let hour = std::fs::read_to_string(out.join("Hour.csv")).unwrap();
        assert_eq!(hour.lines().count(), 2);
        assert!(!out.join("Broken.csv").exists());
    }
}
