//! Active sprint records (TASK.md)

use serde::{Deserialize, Serialize};

use super::Progress;

/// Top-level record written to TASK.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTasks {
    pub sprint: ActiveSprint,
    pub tasks: Vec<Task>,
}

/// Summary of the sprint currently in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSprint {
    pub id: u32,
    pub name: String,
    pub goal: String,
    pub duration: String,
    pub status: String,
    pub progress: Progress,

    /// Run timestamp (RFC 3339, UTC)
    pub last_updated: String,
}

/// A task section with its full detail block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task id (e.g., "task-12")
    pub id: String,
    pub title: String,
    pub priority: String,
    pub status: String,

    /// Estimated effort, free text (e.g., "4 hours")
    pub estimated: String,

    /// May span several lines
    pub description: String,
    pub acceptance_criteria: Vec<AcceptanceCriterion>,

    /// `None` when the document says "None" or has no blockers line
    pub blockers: Option<String>,
    pub documentation: Vec<DocumentationLink>,
}

/// One checklist line under **Acceptance Criteria**
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCriterion {
    pub criterion: String,
    pub completed: bool,
}

/// A `[title](path)` reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationLink {
    pub title: String,
    pub path: String,
}
