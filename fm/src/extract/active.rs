//! Active sprint extraction (TASK.md)
//!
//! The sprint summary fields are single lookups anywhere in the document.
//! Each task starts with a header followed directly by a four-line label
//! block:
//!
//! ```text
//! ### Task 3.1: Preset editor
//!
//! **ID**: task-9
//! **Priority**: HIGH
//! **Status**: IN_PROGRESS
//! **Estimated Effort**: 6 hours
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Extraction, RecordShape, block_lines, capture, description, extract_records, group, normalize, number};
use crate::config::DefaultsConfig;
use crate::domain::{AcceptanceCriterion, ActiveSprint, ActiveTasks, DocumentationLink, Progress, Task};

/// Blockers value that means "no blockers"
const NO_BLOCKERS: &str = "None";

static CURRENT_SPRINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Current Sprint\*\*:\s*Sprint ([0-9]+)\s*-\s*(.+)").expect("valid current sprint pattern")
});

static GOAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Sprint Goal\*\*:\s*(.+)").expect("valid sprint goal pattern"));

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Duration\*\*:\s*(.+)").expect("valid duration pattern"));

static STATUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Status\*\*:\s*(\w+)").expect("valid status pattern"));

static PROGRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Progress\*\*:\s*([0-9]+)/([0-9]+)").expect("valid progress pattern"));

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"### Task [0-9]+\.[0-9]+:\s*(.+?)\n\n",
        r"\*\*ID\*\*:\s*(task-[0-9]+)\n",
        r"\*\*Priority\*\*:\s*(\w+)\n",
        r"\*\*Status\*\*:\s*(\w+)\n",
        r"\*\*Estimated Effort\*\*:\s*(.+)",
    ))
    .expect("valid task header pattern")
});

pub(crate) static TASK_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"### Task [0-9]+\.[0-9]+:").expect("valid task boundary pattern"));

static CRITERIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Acceptance Criteria\*\*:\n((?:- \[.\] .+\n)+)").expect("valid acceptance criteria pattern")
});

static BLOCKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Blockers\*\*:\s*(.+)").expect("valid blockers pattern"));

static DOC_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \[([^\]]+)\]\(([^)]+)\)").expect("valid documentation link pattern"));

/// Detailed task matcher
struct TaskShape;

impl RecordShape for TaskShape {
    type Record = Task;
    const KIND: &'static str = "task";

    fn header(&self) -> &Regex {
        &HEADER
    }

    fn boundary(&self) -> &Regex {
        &TASK_BOUNDARY
    }

    fn build(&self, header: &Captures<'_>, body: &str) -> Option<Task> {
        Some(Task {
            id: group(header, 2),
            title: group(header, 1),
            priority: group(header, 3),
            status: group(header, 4),
            estimated: group(header, 5),
            description: description(body),
            acceptance_criteria: block_lines(&CRITERIA, body)
                .into_iter()
                .filter_map(parse_criterion)
                .collect(),
            blockers: capture(&BLOCKERS, body).filter(|b| b != NO_BLOCKERS),
            documentation: DOC_LINK
                .captures_iter(body)
                .map(|caps| DocumentationLink {
                    title: group(&caps, 1),
                    path: group(&caps, 2),
                })
                .collect(),
        })
    }
}

/// Parse one `- [ ] text` / `- [x] text` checklist line
///
/// The line counts as done when an `x` appears anywhere in its first six
/// characters.
pub(crate) fn parse_criterion(line: &str) -> Option<AcceptanceCriterion> {
    let line = line.trim();
    if !line.starts_with("- [") {
        return None;
    }

    let completed = line.chars().take(6).any(|c| c == 'x');
    let criterion = line.split_once("] ").map(|(_, rest)| rest.trim()).unwrap_or(line);

    Some(AcceptanceCriterion {
        criterion: criterion.to_string(),
        completed,
    })
}

fn active_sprint(doc: &str, defaults: &DefaultsConfig, now: DateTime<Utc>) -> ActiveSprint {
    let fallback = &defaults.active_sprint;
    let current = CURRENT_SPRINT.captures(doc);

    let id = current
        .as_ref()
        .and_then(|caps| number(caps, 1))
        .unwrap_or(fallback.id);
    let name = current
        .as_ref()
        .map(|caps| group(caps, 2))
        .unwrap_or_else(|| fallback.name.clone());
    let progress = PROGRESS
        .captures(doc)
        .and_then(|caps| Some(Progress::new(number(&caps, 1)?, number(&caps, 2)?)))
        .unwrap_or(fallback.progress);

    ActiveSprint {
        id,
        name,
        goal: capture(&GOAL, doc).unwrap_or_else(|| fallback.goal.clone()),
        duration: capture(&DURATION, doc).unwrap_or_else(|| fallback.duration.clone()),
        status: capture(&STATUS, doc).unwrap_or_else(|| fallback.status.clone()),
        progress,
        last_updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// Extract the current sprint summary and its detailed tasks
pub fn extract_active_tasks(text: &str, defaults: &DefaultsConfig, now: DateTime<Utc>) -> Extraction<ActiveTasks> {
    let doc = normalize(text);
    let sprint = active_sprint(&doc, defaults, now);
    let records = extract_records(&doc, &TaskShape);

    info!(
        "Parsed active sprint {} '{}': {} task(s)",
        sprint.id,
        sprint.name,
        records.items.len()
    );

    Extraction {
        recognized: records.items.len(),
        skipped: records.skipped,
        record: ActiveTasks {
            sprint,
            tasks: records.items,
        },
    }
}
