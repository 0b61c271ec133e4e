use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::CleanError;

// ---------------------------------------------------------------------------
// The store interface
// ---------------------------------------------------------------------------

/// Identity of an artifact to be registered: name, type, free-form
/// description. (`kind` is the wire-level "type" field.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A registered artifact version and where its file landed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactHandle {
    pub name: String,
    pub version: u32,
    pub path: PathBuf,
}

/// Narrow facade over the external artifact tracking system.
///
/// Exactly three capabilities; implementers should not assume anything else
/// is available. Version numbering and conflict resolution belong to the
/// store, never to callers.
pub trait ArtifactStore {
    /// Resolve an artifact reference (`name`, `name:latest`, `name:vN`) to a
    /// local file path.
    fn resolve(&self, reference: &str) -> Result<PathBuf, CleanError>;

    /// Register a local file as the next version of the named artifact.
    fn register(&self, spec: &ArtifactSpec, file: &Path) -> Result<ArtifactHandle, CleanError>;

    /// Record a run's key/value configuration for provenance.
    fn record_run_config(&self, job_type: &str, config: &JsonValue) -> Result<(), CleanError>;
}

// ---------------------------------------------------------------------------
// Filesystem-backed implementation
// ---------------------------------------------------------------------------

/// Metadata sidecar written next to every registered artifact file.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactMetadata {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    description: String,
    file: String,
    created_at_ms: u128,
}

/// A directory-per-artifact, directory-per-version store:
///
/// ```text
/// <root>/<name>/v<N>/<filename>
/// <root>/<name>/v<N>/metadata.json
/// <root>/runs/<job_type>-<millis>.json
/// ```
///
/// Versions are immutable once written; registering the same name again
/// always produces `v<N+1>`.
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    /// Open (creating if absent) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CleanError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(LocalDirStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Highest existing version number for `name`, if any.
    fn latest_version(&self, name: &str) -> Result<Option<u32>, CleanError> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Ok(None);
        }
        let mut latest = None;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(v) = file_name
                .to_str()
                .and_then(|s| s.strip_prefix('v'))
                .and_then(|s| s.parse::<u32>().ok())
            else {
                continue;
            };
            latest = Some(latest.map_or(v, |cur: u32| cur.max(v)));
        }
        Ok(latest)
    }

    /// Path of the payload file inside a version directory (the one entry
    /// that is not the metadata sidecar).
    fn payload_in(&self, version_dir: &Path) -> Result<PathBuf, CleanError> {
        for entry in fs::read_dir(version_dir)? {
            let entry = entry?;
            if entry.file_name() != "metadata.json" {
                return Ok(entry.path());
            }
        }
        Err(CleanError::parse(format!(
            "artifact version directory {} has no payload file",
            version_dir.display()
        )))
    }
}

/// Split `name:vN` / `name:latest` / plain `name` into (name, version).
fn parse_reference(reference: &str) -> Result<(&str, Option<u32>), CleanError> {
    let (name, version) = match reference.rsplit_once(':') {
        None => (reference, None),
        Some((name, "latest")) => (name, None),
        Some((name, tag)) => {
            let v = tag
                .strip_prefix('v')
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or_else(|| {
                    CleanError::resolution(reference, format!("unrecognized version tag '{tag}'"))
                })?;
            (name, Some(v))
        }
    };
    if name.is_empty() {
        return Err(CleanError::resolution(reference, "empty artifact name"));
    }
    Ok((name, version))
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

impl ArtifactStore for LocalDirStore {
    fn resolve(&self, reference: &str) -> Result<PathBuf, CleanError> {
        let (name, version) = parse_reference(reference)?;

        let version = match version {
            Some(v) => v,
            None => self
                .latest_version(name)?
                .ok_or_else(|| CleanError::resolution(reference, "no such artifact"))?,
        };

        let version_dir = self.root.join(name).join(format!("v{version}"));
        if !version_dir.is_dir() {
            return Err(CleanError::resolution(
                reference,
                format!("version v{version} does not exist"),
            ));
        }
        self.payload_in(&version_dir)
    }

    fn register(&self, spec: &ArtifactSpec, file: &Path) -> Result<ArtifactHandle, CleanError> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CleanError::parse(format!("bad artifact file name: {file:?}")))?;

        let version = self.latest_version(&spec.name)?.map_or(1, |v| v + 1);
        let version_dir = self.root.join(&spec.name).join(format!("v{version}"));
        fs::create_dir_all(&version_dir)?;

        let dest = version_dir.join(file_name);
        fs::copy(file, &dest)?;

        let metadata = ArtifactMetadata {
            name: spec.name.clone(),
            kind: spec.kind.clone(),
            description: spec.description.clone(),
            file: file_name.to_string(),
            created_at_ms: now_ms(),
        };
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| CleanError::parse(e.to_string()))?;
        fs::write(version_dir.join("metadata.json"), json)?;

        Ok(ArtifactHandle {
            name: spec.name.clone(),
            version,
            path: dest,
        })
    }

    fn record_run_config(&self, job_type: &str, config: &JsonValue) -> Result<(), CleanError> {
        let runs_dir = self.root.join("runs");
        fs::create_dir_all(&runs_dir)?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| CleanError::parse(e.to_string()))?;
        fs::write(runs_dir.join(format!("{job_type}-{}.json", now_ms())), json)?;
        Ok(())
    }
}
