//! End-to-end tests for the `fm` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SPRINTS: &str = "# Sprints

**Project**: Widget Factory
**Total Sprints**: 3

## Sprint 1: Foundations

**Duration**: 2 weeks
**Status**: COMPLETE
**Progress**: 2/2
**Completed**: 2026-09-30

### Deliverables

1. Project scaffold
2. CI pipeline

- `task-1` [DONE] - Scaffold repository
- `task-2` [DONE] - Configure CI

## Sprint 2: Settings Panel

**Duration**: 1 week
**Status**: ACTIVE
**Progress**: 0/1

- `task-3` [TODO] - Settings dialog
";

const TASK: &str = "**Current Sprint**: Sprint 2 - Settings Panel
**Sprint Goal**: Settings survive restarts
**Duration**: 1 week
**Status**: ACTIVE
**Progress**: 0/1

### Task 2.1: Settings dialog

**ID**: task-3
**Priority**: HIGH
**Status**: IN_PROGRESS
**Estimated Effort**: 4 hours

**Description**:
Dialog for editing settings.
Supports Größe and Ünits labels.

**Acceptance Criteria**:
- [x] Export works
- [ ] Import works

**Blockers**: None

**Documentation**:
- [Settings spec](docs/settings.md)
";

const COMPLETED: &str = "### Task 1.1: Scaffold repository

**ID**: task-1
**Status**: COMPLETE
**Completed**: 2026-09-28
**Estimated**: 2 hours
**Actual**: 1 hour
**Sprint**: Sprint 1

**Description**:
Workspace layout.

**Key Deliverables**:
- ✅ Cargo workspace

**Commit**: 3f9a2c1
";

fn write_docs(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("SPRINTS.md"), SPRINTS).unwrap();
    fs::write(dir.join("TASK.md"), TASK).unwrap();
    fs::write(dir.join("COMPLETED_TASKS.md"), COMPLETED).unwrap();
}

fn fm(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fm").unwrap();
    cmd.current_dir(home).env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

fn load(path: &Path) -> serde_yaml::Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_migrates_default_directory() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join(".autoflow");
    write_docs(&docs);

    fm(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Migrating SPRINTS.md to SPRINTS.yml..."))
        .stdout(predicate::str::contains("TASK.yml created successfully"))
        .stdout(predicate::str::contains("COMPLETED_TASKS.yml created successfully"))
        .stdout(predicate::str::contains("Migration complete!"));

    let sprints = load(&docs.join("SPRINTS.yml"));
    assert_eq!(sprints["project"]["name"].as_str(), Some("Widget Factory"));
    assert_eq!(sprints["project"]["current_sprint"].as_u64(), Some(2));
    assert_eq!(sprints["sprints"][0]["completed"].as_str(), Some("2026-09-30"));
    assert!(sprints["sprints"][1].get("completed").is_none());
    assert_eq!(sprints["sprints"][0]["deliverables"][1].as_str(), Some("CI pipeline"));

    let task = load(&docs.join("TASK.yml"));
    assert_eq!(task["sprint"]["name"].as_str(), Some("Settings Panel"));
    assert!(task["tasks"][0]["blockers"].is_null());
    assert_eq!(task["tasks"][0]["acceptance_criteria"][0]["completed"].as_bool(), Some(true));
    assert_eq!(task["tasks"][0]["documentation"][0]["path"].as_str(), Some("docs/settings.md"));

    let completed = load(&docs.join("COMPLETED_TASKS.yml"));
    assert_eq!(completed["tasks"][0]["commit"].as_str(), Some("3f9a2c1"));
    assert_eq!(completed["tasks"][0]["deliverables"][0].as_str(), Some("Cargo workspace"));
    assert_eq!(
        completed["tasks"][0]["quality_metrics"].as_mapping().map(|m| m.len()),
        Some(0)
    );
}

#[test]
fn test_unicode_written_verbatim() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    write_docs(&docs);

    fm(temp.path()).arg("--dir").arg(&docs).assert().success();

    let raw = fs::read_to_string(docs.join("TASK.yml")).unwrap();
    assert!(raw.contains("Größe"));
    assert!(raw.contains("blockers: null"));
}

#[test]
fn test_missing_documents_still_complete() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join(".autoflow");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("TASK.md"), TASK).unwrap();

    fm(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:").count(2))
        .stdout(predicate::str::contains("TASK.yml created successfully"))
        .stdout(predicate::str::contains("Next steps:"));

    assert!(docs.join("TASK.yml").exists());
    assert!(!docs.join("SPRINTS.yml").exists());
}

#[test]
fn test_dry_run_leaves_directory_untouched() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join(".autoflow");
    write_docs(&docs);

    fm(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("parsed (dry run)"));

    assert!(!docs.join("SPRINTS.yml").exists());
    assert!(!docs.join("TASK.yml").exists());
}

#[test]
fn test_config_file_overrides_paths_and_defaults() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("tracking");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("PLAN.md"), "## Sprint 1: Only\n\n**Duration**: 1 week\n**Status**: PLANNED\n**Progress**: 0/1\n")
        .unwrap();
    fs::write(
        temp.path().join(".flowmigrate.yml"),
        "paths:\n  dir: tracking\n  sprints: PLAN.md\ndefaults:\n  project-name: Configured\n  total-sprints: 12\n",
    )
    .unwrap();

    fm(temp.path()).assert().success();

    let plan = load(&docs.join("PLAN.yml"));
    assert_eq!(plan["project"]["name"].as_str(), Some("Configured"));
    assert_eq!(plan["project"]["total_sprints"].as_u64(), Some(12));
    assert_eq!(plan["project"]["current_sprint"].as_u64(), Some(1));
}
