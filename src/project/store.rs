//! On-disk project storage
//!
//! Projects live as individual JSON files in one directory, named after a
//! sanitized form of the project name. The default location is
//! `~/.blockforge/projects`, falling back to `./projects` when no home
//! directory is available.

use super::{Project, SaveData, FORMAT_VERSION};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by project storage
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("project '{0}' not found")]
    NotFound(String),
    #[error("failed to access project file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse project file: {0}")]
    Format(#[from] serde_json::Error),
}

/// One row in a project listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    pub modified: String,
    pub node_count: usize,
    pub path: PathBuf,
}

/// A directory of project save files
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Opens a store rooted at the given directory
    ///
    /// The directory is created lazily on first save.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the store at its standard location
    pub fn default_location() -> Self {
        let root = match dirs::home_dir() {
            Some(home) => home.join(".blockforge/projects"),
            None => PathBuf::from("./projects"),
        };
        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a project of this name saves to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_slug(name)))
    }

    /// Write a project to the store, refreshing its modified timestamp
    pub fn save(&self, project: &mut Project) -> Result<PathBuf, StoreError> {
        project.touch();
        let path = self.path_for(&project.name);
        let json = serde_json::to_string_pretty(&project.to_save_data())?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, json)?;
        info!("Saved project '{}' to {}", project.name, path.display());
        Ok(path)
    }

    /// Load a project by name
    pub fn load(&self, name: &str) -> Result<Project, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.load_path(&path)
    }

    /// Load a project from an explicit file path
    pub fn load_path(&self, path: &Path) -> Result<Project, StoreError> {
        let content = fs::read_to_string(path)?;
        let data: SaveData = serde_json::from_str(&content)?;
        if data.version != FORMAT_VERSION {
            warn!(
                "Project file {} has format version '{}', expected '{}'",
                path.display(),
                data.version,
                FORMAT_VERSION
            );
        }
        debug!("Loaded project '{}' from {}", data.metadata.name, path.display());
        Ok(Project::from_save_data(data))
    }

    /// Delete a project by name
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        info!("Deleted project '{}'", name);
        Ok(())
    }

    /// Summaries of every readable project, most recently modified first
    ///
    /// Unreadable or malformed files are skipped with a warning so one bad
    /// file never hides the rest of the store.
    pub fn list(&self) -> Vec<ProjectSummary> {
        let mut summaries = Vec::new();
        if !self.root.is_dir() {
            return summaries;
        }
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to read project directory {}: {}", self.root.display(), err);
                return summaries;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.load_path(&path) {
                Ok(project) => summaries.push(ProjectSummary {
                    name: project.name,
                    description: project.description,
                    modified: project.modified,
                    node_count: project.graph.node_count(),
                    path,
                }),
                Err(err) => {
                    warn!("Skipping unreadable project file {}: {}", path.display(), err);
                }
            }
        }
        // RFC 3339 timestamps from this store sort chronologically as strings
        summaries.sort_by(|a, b| b.modified.cmp(&a.modified));
        summaries
    }
}

/// Reduce a project name to a safe file stem
fn file_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ModelGraph, NodeInstance};
    use crate::project::SaveMetadata;
    use tempfile::tempdir;

    #[test]
    fn test_file_slug() {
        assert_eq!(file_slug("Simple CNN"), "simple-cnn");
        assert_eq!(file_slug("ResNet Block!"), "resnet-block");
        assert_eq!(file_slug("  ::  "), "untitled");
        assert_eq!(file_slug("already-fine"), "already-fine");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::open(dir.path());

        let mut graph = ModelGraph::new();
        graph.add_node(NodeInstance::new("n1", "relu")).unwrap();
        let mut project = Project::new("Round Trip").with_graph(graph);

        let path = store.save(&mut project).unwrap();
        assert_eq!(path, dir.path().join("round-trip.json"));

        let loaded = store.load("Round Trip").unwrap();
        assert_eq!(loaded, project);
        assert_eq!(loaded.graph.node_count(), 1);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::open(dir.path());
        let err = store.load("ghost").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(name) if name == "ghost"));
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::open(dir.path());
        let mut project = Project::new("Doomed");
        let path = store.save(&mut project).unwrap();
        assert!(path.exists());
        store.delete("Doomed").unwrap();
        assert!(!path.exists());
        assert!(matches!(
            store.delete("Doomed"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_newest_first_and_skips_garbage() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::open(dir.path());
        fs::create_dir_all(dir.path()).unwrap();

        for (name, modified) in [
            ("older", "2026-01-01T00:00:00+00:00"),
            ("newer", "2026-02-01T00:00:00+00:00"),
        ] {
            let data = SaveData {
                version: FORMAT_VERSION.to_string(),
                metadata: SaveMetadata {
                    id: format!("id-{}", name),
                    name: name.to_string(),
                    description: String::new(),
                    created: modified.to_string(),
                    modified: modified.to_string(),
                    creator: crate::project::CREATOR.to_string(),
                },
                graph: ModelGraph::new(),
            };
            let json = serde_json::to_string_pretty(&data).unwrap();
            fs::write(store.path_for(name), json).unwrap();
        }
        fs::write(dir.path().join("broken.json"), "not json at all").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "newer");
        assert_eq!(listed[1].name, "older");
        assert_eq!(listed[0].node_count, 0);
    }
}
