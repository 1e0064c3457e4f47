//! Durable storage of diagrams.
//!
//! A diagram is stored as two JSON arrays, one for nodes and one for edges,
//! under fixed keys of a [`StorageBackend`]. The JSON layout matches the one
//! written by earlier versions of the editor.
//!
//! # Loading
//!
//! Each collection is loaded on its own. A collection that is missing or
//! empty falls back to the matching collection of [`Diagram::example`]. A
//! collection that cannot be parsed is logged and treated as empty.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use serde::{Serialize, de::DeserializeOwned};

use crate::{CanvasError, diagram::Diagram};

/// Key under which the node collection is stored.
pub const NODES_KEY: &str = "uml_nodes_v7";

/// Key under which the edge collection is stored.
pub const EDGES_KEY: &str = "uml_edges_v7";

/// A string key-value store.
pub trait StorageBackend {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn read(&self, key: &str) -> Result<Option<String>, CanvasError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), CanvasError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CanvasError>;
}

/// In-memory backend, mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, CanvasError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CanvasError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CanvasError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend storing each key as `<key>.json` inside a directory.
///
/// The directory is created on first write. Writes go through a temporary
/// file in the same directory, so a value is either fully replaced or left
/// untouched.
#[derive(Debug, Clone)]
pub struct FileBackend {
    directory: PathBuf,
}

impl FileBackend {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, CanvasError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), CanvasError> {
        fs::create_dir_all(&self.directory)?;

        let mut file = tempfile::NamedTempFile::new_in(&self.directory)?;
        io::Write::write_all(&mut file, value.as_bytes())?;
        file.persist(self.path_for(key)).map_err(|err| err.error)?;

        debug!(key, directory = self.directory.display().to_string(); "Value written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CanvasError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Loads and saves whole diagrams through a [`StorageBackend`].
#[derive(Debug)]
pub struct DiagramStore<B> {
    backend: B,
}

impl<B: StorageBackend> DiagramStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Loads the stored diagram, filling missing collections from the
    /// example diagram.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails. Unparseable data
    /// is not an error.
    pub fn load(&self) -> Result<Diagram, CanvasError> {
        let (example_nodes, example_edges) = Diagram::example().into_parts();

        let mut nodes = self.load_collection(NODES_KEY)?;
        if nodes.is_empty() {
            debug!("No stored nodes, using the example nodes");
            nodes = example_nodes;
        }

        let mut edges = self.load_collection(EDGES_KEY)?;
        if edges.is_empty() {
            debug!("No stored edges, using the example edges");
            edges = example_edges;
        }

        info!(nodes = nodes.len(), edges = edges.len(); "Diagram loaded");
        Ok(Diagram::from_parts(nodes, edges))
    }

    /// Stores both collections of `diagram`.
    pub fn save(&mut self, diagram: &Diagram) -> Result<(), CanvasError> {
        let nodes: Vec<_> = diagram.nodes().collect();
        let edges: Vec<_> = diagram.edges().collect();
        self.save_collection(NODES_KEY, &nodes)?;
        self.save_collection(EDGES_KEY, &edges)?;

        info!(nodes = nodes.len(), edges = edges.len(); "Diagram saved");
        Ok(())
    }

    /// Removes both stored collections.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        self.backend.remove(NODES_KEY)?;
        self.backend.remove(EDGES_KEY)?;

        info!("Stored diagram cleared");
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, CanvasError> {
        let Some(content) = self.backend.read(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&content) {
            Ok(items) => Ok(items),
            Err(err) => {
                error!(key, err:%; "Failed to parse stored collection, ignoring it");
                Ok(Vec::new())
            }
        }
    }

    fn save_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), CanvasError> {
        let content = serde_json::to_string(items)?;
        self.backend.write(key, &content)
    }
}

#[cfg(test)]
mod tests {
    use classcanvas_core::{
        geometry::Point,
        semantic::{EntityKind, NodeId, RelationshipKind},
    };
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_store_loads_example() {
        let store = DiagramStore::new(MemoryBackend::new());
        assert_eq!(store.load().unwrap(), Diagram::example());
    }

    #[test]
    fn test_save_and_load_in_memory() {
        let mut diagram = Diagram::example();
        let extra = diagram
            .add_node("Invoice", EntityKind::Class, Point::new(40.0, 60.0))
            .unwrap();
        diagram
            .add_edge(&NodeId::new("2"), &extra, RelationshipKind::Composition, None, None)
            .unwrap();

        let mut store = DiagramStore::new(MemoryBackend::new());
        store.save(&diagram).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, diagram);
        let ids: Vec<_> = loaded.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "n-1"]);
    }

    #[test]
    fn test_collections_fall_back_independently() {
        let mut diagram = Diagram::new();
        diagram.add_node("Solo", EntityKind::Interface, Point::default()).unwrap();

        let mut store = DiagramStore::new(MemoryBackend::new());
        store.save(&diagram).unwrap();
        let loaded = store.load().unwrap();

        // Stored nodes are kept, the empty edge list falls back to the example
        assert_eq!(loaded.node_count(), 1);
        assert_eq!(loaded.edge_count(), 1);
        assert!(loaded.routes(&Default::default())[0].path().is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_ignored() {
        let mut backend = MemoryBackend::new();
        backend.write(NODES_KEY, "{not json").unwrap();
        backend.write(EDGES_KEY, "[]").unwrap();

        let loaded = DiagramStore::new(backend).load().unwrap();
        assert_eq!(loaded, Diagram::example());
    }

    #[test]
    fn test_reads_persisted_layout() {
        let mut backend = MemoryBackend::new();
        backend
            .write(
                NODES_KEY,
                r#"[
                    {"id":"a","x":0,"y":0,"data":{"name":"A","type":"class",
                        "stereotype":"","attributes":[],"operations":[]}},
                    {"id":"b","x":400,"y":0,"data":{"name":"B","type":"interface",
                        "stereotype":"","attributes":[],"operations":[]}}
                ]"#,
            )
            .unwrap();
        backend
            .write(
                EDGES_KEY,
                r#"[{"id":"e-1","from":"a","to":"b","type":"realization",
                    "startMult":"","endMult":"","startAnchor":"e","endAnchor":"w"}]"#,
            )
            .unwrap();

        let loaded = DiagramStore::new(backend).load().unwrap();
        assert_eq!(loaded.node_count(), 2);
        let edge = loaded.edges().next().unwrap();
        assert_eq!(edge.kind, RelationshipKind::Realization);
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut store = DiagramStore::new(MemoryBackend::new());
        store.save(&Diagram::new()).unwrap();
        assert!(store.backend().read(NODES_KEY).unwrap().is_some());

        store.clear().unwrap();
        assert!(store.backend().read(NODES_KEY).unwrap().is_none());
        assert!(store.backend().read(EDGES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("diagrams"));

        assert_eq!(backend.read(NODES_KEY).unwrap(), None);
        backend.write(NODES_KEY, "[]").unwrap();
        backend.write(NODES_KEY, "[1]").unwrap();
        assert_eq!(backend.read(NODES_KEY).unwrap().as_deref(), Some("[1]"));
        assert!(dir.path().join("diagrams").join("uml_nodes_v7.json").is_file());

        backend.remove(NODES_KEY).unwrap();
        backend.remove(NODES_KEY).unwrap();
        assert_eq!(backend.read(NODES_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut diagram = Diagram::example();
        diagram.move_node(&NodeId::new("1"), Point::new(200.0, 400.0), 20.0).unwrap();

        let mut store = DiagramStore::new(FileBackend::new(dir.path()));
        store.save(&diagram).unwrap();

        let reopened = DiagramStore::new(FileBackend::new(dir.path()));
        assert_eq!(reopened.load().unwrap(), diagram);
    }
}
