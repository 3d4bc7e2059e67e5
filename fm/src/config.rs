//! flowmigrate configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Progress;

/// Main flowmigrate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the Markdown documents live
    pub paths: PathsConfig,

    /// Fallback values used when a document header is missing
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Project-local config file name, looked up in the working directory
    pub const LOCAL_FILE: &'static str = ".flowmigrate.yml";

    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise the project-local file, then the
    /// user file, are tried in order; a candidate that fails to parse is
    /// logged and the next one is tried.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            log::debug!("Using config from --config: {}", path.display());
            return Ok(config);
        }

        for (source, path) in Self::candidates() {
            if !path.exists() {
                log::debug!("No {} config at {}", source, path.display());
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    log::debug!(
                        "Using {} config {} (documents in {})",
                        source,
                        path.display(),
                        config.paths.dir.display()
                    );
                    return Ok(config);
                }
                Err(e) => log::warn!("Ignoring {} config {}: {:#}", source, path.display(), e),
            }
        }

        log::debug!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Config files searched when no explicit path is given, in priority order
    fn candidates() -> Vec<(&'static str, PathBuf)> {
        let mut candidates = vec![("project", PathBuf::from(Self::LOCAL_FILE))];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(("user", config_dir.join("flowmigrate").join("flowmigrate.yml")));
        }
        candidates
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        serde_yaml::from_str(&content).context("Failed to parse config file")
    }
}

/// Document locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the documents; outputs are written next to them
    pub dir: PathBuf,

    /// Sprint plan document
    pub sprints: String,

    /// Active sprint task document
    pub task: String,

    /// Completed task log
    #[serde(rename = "completed-tasks")]
    pub completed_tasks: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".autoflow"),
            sprints: "SPRINTS.md".to_string(),
            task: "TASK.md".to_string(),
            completed_tasks: "COMPLETED_TASKS.md".to_string(),
        }
    }
}

/// Fallback values for missing document headers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Project name when SPRINTS.md has no `**Project**:` line
    #[serde(rename = "project-name")]
    pub project_name: String,

    /// Sprint count when SPRINTS.md has no `**Total Sprints**:` line
    #[serde(rename = "total-sprints")]
    pub total_sprints: u32,

    /// Current sprint when no sprint is ACTIVE
    #[serde(rename = "current-sprint")]
    pub current_sprint: u32,

    /// Header fallbacks for TASK.md
    #[serde(rename = "active-sprint")]
    pub active_sprint: ActiveSprintDefaults,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            project_name: "CraftyPrep - Laser Engraving Image Prep Tool".to_string(),
            total_sprints: 7,
            current_sprint: 1,
            active_sprint: ActiveSprintDefaults::default(),
        }
    }
}

/// Header fallbacks for the active sprint document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSprintDefaults {
    pub id: u32,
    pub name: String,
    pub goal: String,
    pub duration: String,
    pub status: String,

    /// Used when TASK.md has no `**Progress**:` line
    pub progress: Progress,
}

impl Default for ActiveSprintDefaults {
    fn default() -> Self {
        Self {
            id: 3,
            name: "Material Presets & Settings".to_string(),
            goal: String::new(),
            duration: "TBD".to_string(),
            status: "ACTIVE".to_string(),
            progress: Progress::new(0, 0),
        }
    }
}
