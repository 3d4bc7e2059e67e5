//! Completed task log extraction (COMPLETED_TASKS.md)

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::active::TASK_BOUNDARY;
use super::{Extraction, RecordShape, block_lines, capture, description, extract_records, group, normalize};
use crate::config::DefaultsConfig;
use crate::domain::{CompletedLog, CompletedTask, ProjectStub, QualityMetrics};

/// Bullet marker of a key deliverable line
const DELIVERABLE_MARKER: &str = "- ✅";

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"### Task [0-9]+\.[0-9]+:\s*(.+?)\n\n",
        r"\*\*ID\*\*:\s*(task-[0-9]+)\n",
        r"\*\*Status\*\*:\s*(\w+)\n",
        r"\*\*Completed\*\*:\s*(.+?)\n",
        r"\*\*Estimated\*\*:\s*(.+?)\n",
        r"\*\*Actual\*\*:\s*(.+?)\n",
        r"\*\*Sprint\*\*:\s*(.+)",
    ))
    .expect("valid completed task header pattern")
});

static DELIVERABLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Key Deliverables\*\*:\n((?:- ✅ .+\n)+)").expect("valid key deliverables pattern")
});

static COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Commit\*\*:\s*([a-f0-9]+)").expect("valid commit pattern"));

static TESTS_PASSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tests passing:\s*(.+)").expect("valid tests passing pattern"));

static CODE_COVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Code coverage:\s*(.+)").expect("valid code coverage pattern"));

struct CompletedTaskShape;

impl RecordShape for CompletedTaskShape {
    type Record = CompletedTask;
    const KIND: &'static str = "completed task";

    fn header(&self) -> &Regex {
        &HEADER
    }

    fn boundary(&self) -> &Regex {
        &TASK_BOUNDARY
    }

    fn build(&self, header: &Captures<'_>, body: &str) -> Option<CompletedTask> {
        Some(CompletedTask {
            id: group(header, 2),
            title: group(header, 1),
            status: group(header, 3),
            completed: group(header, 4),
            estimated: group(header, 5),
            actual: group(header, 6),
            sprint: group(header, 7),
            description: description(body),
            deliverables: block_lines(&DELIVERABLES, body)
                .into_iter()
                .map(|line| line.strip_prefix(DELIVERABLE_MARKER).unwrap_or(line).trim().to_string())
                .collect(),
            commit: capture(&COMMIT, body),
            quality_metrics: QualityMetrics {
                tests_passing: capture(&TESTS_PASSING, body),
                code_coverage: capture(&CODE_COVERAGE, body),
            },
        })
    }
}

/// Extract every finished task from the completed log
pub fn extract_completed_tasks(
    text: &str,
    defaults: &DefaultsConfig,
    now: DateTime<Utc>,
) -> Extraction<CompletedLog> {
    let doc = normalize(text);
    let records = extract_records(&doc, &CompletedTaskShape);

    info!("Parsed completed task log: {} task(s)", records.items.len());

    Extraction {
        recognized: records.items.len(),
        skipped: records.skipped,
        record: CompletedLog {
            project: ProjectStub {
                name: defaults.project_name.clone(),
                last_updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            tasks: records.items,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap()
    }

    fn extract(text: &str) -> Extraction<CompletedLog> {
        extract_completed_tasks(text, &DefaultsConfig::default(), now())
    }

    const LOG: &str = "# Completed Tasks

### Task 1.1: Project scaffold

**ID**: task-1
**Status**: COMPLETE
**Completed**: 2026-09-28
**Estimated**: 2 hours
**Actual**: 1.5 hours
**Sprint**: Sprint 1

**Description**:
Set up the workspace and lint config.

**Key Deliverables**:
- ✅ Cargo workspace
- ✅ Lint rules for é and ü in identifiers

**Commit**: 3f9a2c1

**Quality Metrics**:
- Tests passing: 42/42
- Code coverage: 87%

### Task 1.2: CI pipeline

**ID**: task-2
**Status**: COMPLETE
**Completed**: 2026-09-29
**Estimated**: 3 hours
**Actual**: 4 hours
**Sprint**: Sprint 1

**Description**:
Hook up CI.

**Notes**: nothing else
";

    #[test]
    fn test_header_fields() {
        let extraction = extract(LOG);
        let task = &extraction.record.tasks[0];

        assert_eq!(extraction.recognized, 2);
        assert_eq!(extraction.skipped, 0);
        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "Project scaffold");
        assert_eq!(task.status, "COMPLETE");
        assert_eq!(task.completed, "2026-09-28");
        assert_eq!(task.estimated, "2 hours");
        assert_eq!(task.actual, "1.5 hours");
        assert_eq!(task.sprint, "Sprint 1");
    }

    #[test]
    fn test_body_fields() {
        let tasks = extract(LOG).record.tasks;
        let task = &tasks[0];

        assert_eq!(task.description, "Set up the workspace and lint config.");
        assert_eq!(
            task.deliverables,
            vec!["Cargo workspace", "Lint rules for é and ü in identifiers"]
        );
        assert_eq!(task.commit.as_deref(), Some("3f9a2c1"));
        assert_eq!(task.quality_metrics.tests_passing.as_deref(), Some("42/42"));
        assert_eq!(task.quality_metrics.code_coverage.as_deref(), Some("87%"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let tasks = extract(LOG).record.tasks;
        let task = &tasks[1];

        assert_eq!(task.description, "Hook up CI.");
        assert!(task.deliverables.is_empty());
        assert_eq!(task.commit, None);
        assert_eq!(task.quality_metrics, QualityMetrics::default());
    }

    #[test]
    fn test_project_stub() {
        let project = extract(LOG).record.project;

        assert_eq!(project.name, "CraftyPrep - Laser Engraving Image Prep Tool");
        assert_eq!(project.last_updated, "2026-10-19T08:15:00Z");
    }

    #[test]
    fn test_non_hex_commit_is_absent() {
        let text = "### Task 2.1: Docs\n\n**ID**: task-5\n**Status**: COMPLETE\n**Completed**: 2026-10-01\n\
                    **Estimated**: 1 hour\n**Actual**: 1 hour\n**Sprint**: Sprint 2\n\n**Commit**: N/A\n";
        let task = &extract(text).record.tasks[0];

        assert_eq!(task.commit, None);
    }

    #[test]
    fn test_incomplete_label_block_is_skipped() {
        let text = "### Task 2.1: Docs\n\n**ID**: task-5\n**Status**: COMPLETE\n**Completed**: 2026-10-01\n\
                    **Actual**: 1 hour\n**Sprint**: Sprint 2\n";
        let extraction = extract(text);

        assert!(extraction.record.tasks.is_empty());
        assert_eq!(extraction.skipped, 1);
    }
}
