//! Record types produced by the extractors
//!
//! Field declaration order is the key order of the written YAML, so fields
//! are laid out the way downstream auto-flow tooling expects to read them.

mod completed;
mod sprint;
mod task;

pub use completed::{CompletedLog, CompletedTask, ProjectStub, QualityMetrics};
pub use sprint::{ProjectInfo, Sprint, SprintPlan, SprintTask};
pub use task::{AcceptanceCriterion, ActiveSprint, ActiveTasks, DocumentationLink, Task};

use serde::{Deserialize, Serialize};

/// Completed/total counters as written in a `**Progress**: 3/5` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }
}
