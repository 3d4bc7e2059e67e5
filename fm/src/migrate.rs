//! Migration orchestrator
//!
//! Runs the three document pipelines in order. Each pipeline reads one
//! Markdown document, extracts its record tree and writes `<stem>.yml` next
//! to it. A failing pipeline is reported and the next one still runs;
//! output already written by a failed pipeline is left in place.

use chrono::{DateTime, Utc};
use colored::*;
use log::{debug, error, info};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{MigrateError, Result};
use crate::extract::{Extraction, extract_active_tasks, extract_completed_tasks, extract_sprint_plan};
use crate::sink;

/// Extension of the structured output files
pub const OUTPUT_EXTENSION: &str = "yml";

/// Manual follow-ups printed after every run
pub const NEXT_STEPS: [&str; 3] = [
    "Review the generated YAML files",
    "Backup the Markdown files",
    "Test with auto-flow commands",
];

/// One document-to-YAML pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Sprints,
    Task,
    CompletedTasks,
}

impl Pipeline {
    /// Pipelines in run order
    pub const ALL: [Pipeline; 3] = [Pipeline::Sprints, Pipeline::Task, Pipeline::CompletedTasks];

    /// Source document path for this pipeline
    pub fn source(&self, config: &Config) -> PathBuf {
        let paths = &config.paths;
        let name = match self {
            Self::Sprints => &paths.sprints,
            Self::Task => &paths.task,
            Self::CompletedTasks => &paths.completed_tasks,
        };
        paths.dir.join(name)
    }

    /// What the extracted records are called in the summary line
    fn noun(&self) -> &'static str {
        match self {
            Self::Sprints => "sprint",
            Self::Task | Self::CompletedTasks => "task",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sprints => write!(f, "sprints"),
            Self::Task => write!(f, "task"),
            Self::CompletedTasks => write!(f, "completed-tasks"),
        }
    }
}

/// Destination path for a source document: same directory and stem, `.yml`
pub fn destination_for(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

/// Counts from a successful pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub recognized: usize,
    pub skipped: usize,
    pub written: bool,
}

/// Result of one pipeline
#[derive(Debug)]
pub struct PipelineOutcome {
    pub pipeline: Pipeline,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub result: Result<Summary>,
}

/// Per-pipeline results of a full run
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub outcomes: Vec<PipelineOutcome>,
}

impl MigrationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn outcome(&self, pipeline: Pipeline) -> Option<&PipelineOutcome> {
        self.outcomes.iter().find(|o| o.pipeline == pipeline)
    }
}

/// Drives the three pipelines
pub struct Migrator {
    config: Config,
    dry_run: bool,
}

impl Migrator {
    pub fn new(config: Config) -> Self {
        Self { config, dry_run: false }
    }

    /// Extract and report without writing any output
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every pipeline, printing progress to `out`
    ///
    /// Only failures to write progress to `out` are returned as errors;
    /// pipeline failures are captured in the report.
    pub fn run<W: Write>(&self, now: DateTime<Utc>, out: &mut W) -> io::Result<MigrationReport> {
        writeln!(out, "🔄 Migrating auto-flow files from Markdown to YAML...")?;
        writeln!(out)?;

        let mut report = MigrationReport::default();
        for (index, pipeline) in Pipeline::ALL.into_iter().enumerate() {
            let source = pipeline.source(&self.config);
            let destination = destination_for(&source);
            let dest_name = file_name(&destination);

            writeln!(
                out,
                "{}. Migrating {} to {}...",
                index + 1,
                file_name(&source),
                dest_name
            )?;

            let result = self.run_pipeline(pipeline, &source, &destination, now);
            match &result {
                Ok(summary) => {
                    let verb = if summary.written { "created successfully" } else { "parsed (dry run)" };
                    let mut counts = format!("{} {}(s)", summary.recognized, pipeline.noun());
                    if summary.skipped > 0 {
                        counts.push_str(&format!(", {} skipped", summary.skipped));
                    }
                    writeln!(out, "   ✅ {} ({})", format!("{} {}", dest_name, verb).green(), counts)?;
                }
                Err(e) => {
                    error!("{} pipeline failed: {}", pipeline, e);
                    writeln!(out, "   ❌ {}", format!("Error: {}", e).red())?;
                }
            }
            writeln!(out)?;

            report.outcomes.push(PipelineOutcome {
                pipeline,
                source,
                destination,
                result,
            });
        }

        writeln!(out, "✨ Migration complete!")?;
        writeln!(out)?;
        writeln!(out, "Next steps:")?;
        for (index, step) in NEXT_STEPS.iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, step)?;
        }

        info!(
            "Migration finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    fn run_pipeline(&self, pipeline: Pipeline, source: &Path, destination: &Path, now: DateTime<Utc>) -> Result<Summary> {
        debug!("Running {} pipeline: {} -> {}", pipeline, source.display(), destination.display());

        let text = fs::read_to_string(source).map_err(|e| MigrateError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let defaults = &self.config.defaults;

        match pipeline {
            Pipeline::Sprints => self.finish(destination, extract_sprint_plan(&text, defaults, now)),
            Pipeline::Task => self.finish(destination, extract_active_tasks(&text, defaults, now)),
            Pipeline::CompletedTasks => self.finish(destination, extract_completed_tasks(&text, defaults, now)),
        }
    }

    fn finish<T: Serialize>(&self, destination: &Path, extraction: Extraction<T>) -> Result<Summary> {
        if self.dry_run {
            // Still serialize so a dry run surfaces serialization failures
            sink::to_yaml(&extraction.record)?;
        } else {
            sink::write_yaml(destination, &extraction.record)?;
        }

        Ok(Summary {
            recognized: extraction.recognized,
            skipped: extraction.skipped,
            written: !self.dry_run,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
