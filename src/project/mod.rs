//! Projects: a named graph with identity and timestamps
//!
//! A [`Project`] wraps one [`ModelGraph`] together with the metadata the
//! editor shows in its project browser. On disk every project is a single
//! JSON document wrapped in a versioned [`SaveData`] envelope, so older
//! files stay readable when the format grows.

pub mod store;

pub use store::{ProjectStore, ProjectSummary, StoreError};

use crate::graph::ModelGraph;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope format version written into every save file
pub const FORMAT_VERSION: &str = "1.0";

/// Creator tag written into save metadata
pub const CREATOR: &str = "Blockforge 0.1";

/// A named, timestamped model graph
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// ISO 8601 timestamp
    pub created: String,
    /// ISO 8601 timestamp
    pub modified: String,
    pub graph: ModelGraph,
}

impl Project {
    /// Creates an empty project with a fresh id and current timestamps
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            created: now.clone(),
            modified: now,
            graph: ModelGraph::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_graph(mut self, graph: ModelGraph) -> Self {
        self.graph = graph;
        self
    }

    /// Refresh the modified timestamp
    pub fn touch(&mut self) {
        self.modified = Utc::now().to_rfc3339();
    }

    /// Wrap this project in the on-disk envelope
    pub fn to_save_data(&self) -> SaveData {
        SaveData {
            version: FORMAT_VERSION.to_string(),
            metadata: SaveMetadata {
                id: self.id.clone(),
                name: self.name.clone(),
                description: self.description.clone(),
                created: self.created.clone(),
                modified: self.modified.clone(),
                creator: CREATOR.to_string(),
            },
            graph: self.graph.clone(),
        }
    }

    /// Unwrap a project from its on-disk envelope
    pub fn from_save_data(data: SaveData) -> Self {
        Self {
            id: data.metadata.id,
            name: data.metadata.name,
            description: data.metadata.description,
            created: data.metadata.created,
            modified: data.metadata.modified,
            graph: data.graph,
        }
    }
}

/// Save file data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub metadata: SaveMetadata,
    pub graph: ModelGraph,
}

/// Metadata for save files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub modified: String,
    pub creator: String,
}
