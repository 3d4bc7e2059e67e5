//! Sprint plan extraction (SPRINTS.md)
//!
//! ```text
//! **Project**: Widget Factory
//! **Total Sprints**: 4
//!
//! ## Sprint 2: Settings Panel
//!
//! **Duration**: 1 week
//! **Status**: COMPLETE
//! **Progress**: 5/5
//!
//! ### Deliverables
//!
//! 1. Settings dialog
//!
//! - `task-7` [DONE] - Persist settings
//! ```

use chrono::{DateTime, Utc};
use log::info;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Extraction, RecordShape, block_lines, capture, extract_records, group, normalize, number};
use crate::config::DefaultsConfig;
use crate::domain::{Progress, ProjectInfo, Sprint, SprintPlan, SprintTask};

static PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Project\*\*:\s*(.+)").expect("valid project pattern"));

static TOTAL_SPRINTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Total Sprints\*\*:\s*([0-9]+)").expect("valid total sprints pattern"));

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"## Sprint ([0-9]+):\s*(.+?)\n\n",
        r"\*\*Duration\*\*:\s*(.+?)\n",
        r"\*\*Status\*\*:\s*(\w+)\n",
        r"\*\*Progress\*\*:\s*([0-9]+)/([0-9]+)",
    ))
    .expect("valid sprint header pattern")
});

static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## Sprint [0-9]+:").expect("valid sprint boundary pattern"));

static DELIVERABLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"### Deliverables\n\n((?:[0-9]+\..*\n)+)").expect("valid deliverables pattern"));

static TASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`?(task-[0-9]+)`?\s*\[(\w+)\]\s*-\s*(.+)").expect("valid sprint task pattern")
});

static COMPLETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Completed\*\*:\s*(.+)").expect("valid completed pattern"));

/// Sprint section matcher
struct SprintShape {
    /// Completion date for COMPLETE sprints that do not state one
    run_date: String,
}

impl RecordShape for SprintShape {
    type Record = Sprint;
    const KIND: &'static str = "sprint";

    fn header(&self) -> &Regex {
        &HEADER
    }

    fn boundary(&self) -> &Regex {
        &BOUNDARY
    }

    fn build(&self, header: &Captures<'_>, body: &str) -> Option<Sprint> {
        let mut sprint = Sprint {
            id: number(header, 1)?,
            goal: group(header, 2),
            duration: group(header, 3),
            status: group(header, 4),
            progress: Progress::new(number(header, 5)?, number(header, 6)?),
            deliverables: deliverables(body),
            tasks: tasks(body),
            completed: None,
        };

        if sprint.is_complete() {
            sprint.completed = Some(capture(&COMPLETED, body).unwrap_or_else(|| self.run_date.clone()));
        }

        Some(sprint)
    }
}

/// Numbered lines under `### Deliverables`, numbering stripped
fn deliverables(body: &str) -> Vec<String> {
    block_lines(&DELIVERABLES, body)
        .into_iter()
        .map(|line| {
            let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
            rest.strip_prefix('.').unwrap_or(rest).trim().to_string()
        })
        .collect()
}

fn tasks(body: &str) -> Vec<SprintTask> {
    TASK.captures_iter(body)
        .map(|caps| SprintTask {
            id: group(&caps, 1),
            status: group(&caps, 2),
            title: group(&caps, 3),
        })
        .collect()
}

/// Extract the project header and every sprint section
pub fn extract_sprint_plan(text: &str, defaults: &DefaultsConfig, now: DateTime<Utc>) -> Extraction<SprintPlan> {
    let doc = normalize(text);
    let run_date = now.format("%Y-%m-%d").to_string();

    let name = capture(&PROJECT, &doc).unwrap_or_else(|| defaults.project_name.clone());
    let total_sprints = capture(&TOTAL_SPRINTS, &doc)
        .and_then(|n| n.parse().ok())
        .unwrap_or(defaults.total_sprints);

    let shape = SprintShape {
        run_date: run_date.clone(),
    };
    let records = extract_records(&doc, &shape);
    let sprints = records.items;

    let current_sprint = sprints
        .iter()
        .find(|s| s.is_active())
        .map(|s| s.id)
        .unwrap_or(defaults.current_sprint);

    info!(
        "Parsed sprint plan '{}': {} sprint(s), current sprint {}",
        name,
        sprints.len(),
        current_sprint
    );

    Extraction {
        recognized: sprints.len(),
        skipped: records.skipped,
        record: SprintPlan {
            project: ProjectInfo {
                name,
                total_sprints,
                current_sprint,
                last_updated: run_date,
            },
            sprints,
        },
    }
}
