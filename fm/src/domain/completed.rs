//! Completed task log records (COMPLETED_TASKS.md)

use serde::{Deserialize, Serialize};

/// Top-level record written to COMPLETED_TASKS.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedLog {
    pub project: ProjectStub,
    pub tasks: Vec<CompletedTask>,
}

/// Project metadata stub; the log itself carries no project header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStub {
    pub name: String,

    /// Run timestamp (RFC 3339, UTC)
    pub last_updated: String,
}

/// A finished task entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: String,
    pub title: String,
    pub status: String,

    /// Completion date as written in the log
    pub completed: String,
    pub estimated: String,
    pub actual: String,

    /// Originating sprint label (e.g., "Sprint 2")
    pub sprint: String,
    pub description: String,
    pub deliverables: Vec<String>,

    /// Hex revision id from the `**Commit**:` line
    pub commit: Option<String>,
    pub quality_metrics: QualityMetrics,
}

/// Quality metrics; keys without a source line are left out entirely
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests_passing: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_coverage: Option<String>,
}
