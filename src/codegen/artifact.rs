//! Immutable artifact sets produced by an export

use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

pub const MODEL_FILE: &str = "model.py";
pub const TRAIN_FILE: &str = "train.py";
pub const CONFIG_FILE: &str = "config.json";
pub const README_FILE: &str = "README.md";

/// Filename-to-content map produced by one export
///
/// Assembled once by the generator and read-only afterwards; exporting the
/// same snapshot twice yields byte-identical sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    files: BTreeMap<String, String>,
}

impl ArtifactSet {
    pub(crate) fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, content: String) {
        self.files.insert(name.to_string(), content);
    }

    /// Content of one artifact by filename
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(|content| content.as_str())
    }

    /// Filenames in the set, in name order
    pub fn names(&self) -> Vec<&str> {
        self.files.keys().map(|name| name.as_str()).collect()
    }

    /// Iterate filename and content pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every artifact into a directory, creating it if needed
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for (name, content) in &self.files {
            let path = dir.join(name);
            debug!("Writing artifact {}", path.display());
            fs::write(path, content)?;
        }
        Ok(())
    }
}
