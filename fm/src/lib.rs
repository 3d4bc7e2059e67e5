//! flowmigrate - auto-flow Markdown to YAML migration
//!
//! Converts the three hand-written auto-flow tracking documents into
//! structured YAML that tooling can read without re-parsing prose:
//!
//! ```text
//! .autoflow/
//! ├── SPRINTS.md           -> SPRINTS.yml          (project + sprints)
//! ├── TASK.md              -> TASK.yml             (active sprint + tasks)
//! └── COMPLETED_TASKS.md   -> COMPLETED_TASKS.yml  (finished tasks)
//! ```
//!
//! # Modules
//!
//! - [`extract`] - One pattern-based extractor per document shape
//! - [`domain`] - Record types, in output key order
//! - [`sink`] - YAML serialization
//! - [`migrate`] - Orchestrator running the three pipelines
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod migrate;
pub mod sink;

pub use config::{Config, DefaultsConfig, PathsConfig};
pub use error::MigrateError;
pub use extract::{Extraction, extract_active_tasks, extract_completed_tasks, extract_sprint_plan};
pub use migrate::{MigrationReport, Migrator, Pipeline, PipelineOutcome, Summary};
