//! Project files.
//!
//! A project is the persisted form of a session: snapshot content plus the
//! view mode and tool, stamped with a schema version and save time. Files are
//! pretty-printed JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use rampkit_core::constants::PROJECT_SCHEMA_VERSION;
use rampkit_core::{ObjectId, ProjectError, Result};

use crate::model::Object2D;
use crate::normalise::normalise_object;
use crate::session::Tool;
use crate::snapshot::{SnapIncrement, Snapshot};

/// Canvas view the project was last shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "2d")]
    Plan,
    #[serde(rename = "3d")]
    Preview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProject {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default)]
    pub tool: Tool,
    pub snap_to_grid: bool,
    pub snap_to_objects: bool,
    pub snap_increment_mm: SnapIncrement,
    pub objects: Vec<Object2D>,
    #[serde(default)]
    pub selected_id: Option<ObjectId>,
}

impl PersistedProject {
    /// Captures `snapshot` at the current time.
    pub fn from_snapshot(snapshot: &Snapshot, mode: ViewMode, tool: Tool) -> Self {
        Self {
            schema_version: PROJECT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            mode,
            tool,
            snap_to_grid: snapshot.snap_to_grid,
            snap_to_objects: snapshot.snap_to_objects,
            snap_increment_mm: snapshot.snap_increment_mm,
            objects: snapshot.objects.clone(),
            selected_id: snapshot.selected_id.clone(),
        }
    }

    /// Rebuilds a snapshot. Objects are normalised, later duplicates of an
    /// id are dropped and a dangling selection is cleared.
    pub fn into_snapshot(self) -> Snapshot {
        let mut seen = HashSet::new();
        let mut objects = Vec::with_capacity(self.objects.len());
        for obj in &self.objects {
            if !seen.insert(obj.id().clone()) {
                warn!("Dropping duplicate object id {} from project", obj.id());
                continue;
            }
            objects.push(normalise_object(obj).into_owned());
        }

        let snapshot = Snapshot {
            objects,
            selected_id: self.selected_id,
            selected_measurement_key: None,
            snap_to_grid: self.snap_to_grid,
            snap_to_objects: self.snap_to_objects,
            snap_increment_mm: self.snap_increment_mm,
        };
        snapshot.reconcile_selection().into_owned()
    }

    pub fn check_schema(&self) -> Result<()> {
        if self.schema_version != PROJECT_SCHEMA_VERSION {
            return Err(ProjectError::UnsupportedSchema {
                found: self.schema_version,
                expected: PROJECT_SCHEMA_VERSION,
            }
            .into());
        }
        Ok(())
    }

    /// Rejects content that should never be written: empty or repeated ids.
    pub fn validate(&self) -> Result<()> {
        self.check_schema()?;
        let mut seen = HashSet::new();
        for obj in &self.objects {
            if obj.id().as_str().is_empty() {
                return Err(ProjectError::InvalidProject {
                    reason: format!("{} without an id", obj.kind()),
                }
                .into());
            }
            if !seen.insert(obj.id()) {
                return Err(ProjectError::DuplicateObjectId {
                    id: obj.id().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Storage backend for projects.
pub trait ProjectStore {
    fn load(&self) -> Result<PersistedProject>;
    fn save(&self, project: &PersistedProject) -> Result<()>;
}

/// Project stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Result<PersistedProject> {
        let content = fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        // Check the version before the shape so old files report the schema
        let found = value
            .get("schemaVersion")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| ProjectError::InvalidProject {
                reason: "missing schemaVersion".to_string(),
            })?;
        if found != u64::from(PROJECT_SCHEMA_VERSION) {
            return Err(ProjectError::UnsupportedSchema {
                found: u32::try_from(found).unwrap_or(u32::MAX),
                expected: PROJECT_SCHEMA_VERSION,
            }
            .into());
        }
        let project: PersistedProject = serde_json::from_value(value)?;
        info!(
            "Loaded project {} ({} objects)",
            self.path.display(),
            project.objects.len()
        );
        Ok(project)
    }

    /// Writes a sibling temp file, then renames it over the target.
    fn save(&self, project: &PersistedProject) -> Result<()> {
        project.validate()?;
        let json = serde_json::to_string_pretty(project)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        info!(
            "Saved project {} ({} objects)",
            self.path.display(),
            project.objects.len()
        );
        Ok(())
    }
}
