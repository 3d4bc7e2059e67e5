//! Sprint plan records (SPRINTS.md)

use serde::{Deserialize, Serialize};

use super::Progress;

/// Sprint status token that marks the sprint currently being worked
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// Sprint status token that marks a finished sprint
pub const STATUS_COMPLETE: &str = "COMPLETE";

/// Top-level record written to SPRINTS.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintPlan {
    pub project: ProjectInfo,
    pub sprints: Vec<Sprint>,
}

/// Project header of the sprint plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name from the `**Project**:` line
    pub name: String,

    /// Planned number of sprints from the `**Total Sprints**:` line
    pub total_sprints: u32,

    /// Id of the first ACTIVE sprint
    pub current_sprint: u32,

    /// Run date (YYYY-MM-DD)
    pub last_updated: String,
}

/// A single sprint section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: u32,
    pub goal: String,
    pub status: String,
    pub duration: String,
    pub progress: Progress,
    pub deliverables: Vec<String>,
    pub tasks: Vec<SprintTask>,

    /// Completion date, only set for COMPLETE sprints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
}

impl Sprint {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn is_complete(&self) -> bool {
        self.status == STATUS_COMPLETE
    }
}

/// Task summary line inside a sprint (`` `task-7` [DONE] - Title ``)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintTask {
    pub id: String,
    pub status: String,
    pub title: String,
}
