//! Saving and loading circuits.
//!
//! A circuit serializes to a JSON object holding its gates, wires and
//! counters:
//!
//! ```json
//! { "gates": [...], "wires": [...], "gateIdCounter": 4, "wireIdCounter": 3,
//!   "inputCounter": 2, "outputCounter": 1 }
//! ```
//!
//! Loading that object back yields an identical circuit, which resumes id and
//! label numbering where it stopped.
//!
//! Named projects keep their most recent versions (10 by default), newest
//! first, in any flat string store implementing [`KeyValueStore`].

use std::collections::BTreeMap;
use std::io::{Read, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::Result;

/// Default number of versions kept per project.
pub const MAX_VERSIONS: usize = 10;

const PROJECT_PREFIX: &str = "project:";

pub fn to_json(circuit: &Circuit) -> Result<String> {
    Ok(serde_json::to_string(circuit)?)
}

pub fn to_json_pretty(circuit: &Circuit) -> Result<String> {
    Ok(serde_json::to_string_pretty(circuit)?)
}

pub fn from_json(text: &str) -> Result<Circuit> {
    Ok(serde_json::from_str(text)?)
}

pub fn write_json<W: Write>(writer: W, circuit: &Circuit) -> Result<()> {
    serde_json::to_writer_pretty(writer, circuit)?;
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<Circuit> {
    Ok(serde_json::from_reader(reader)?)
}

/// A flat string-keyed store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str) -> bool;
    fn keys(&self) -> Vec<String>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// One saved state of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersion {
    /// Caller-supplied timestamp, e.g. milliseconds since the epoch.
    pub saved_at: u64,
    pub circuit: Circuit,
}

/// Named projects with bounded version lists.
#[derive(Debug, Clone)]
pub struct Projects<S> {
    store: S,
    max_versions: usize,
}

impl<S: KeyValueStore> Projects<S> {
    pub fn new(store: S) -> Self {
        Self::with_max_versions(store, MAX_VERSIONS)
    }

    pub fn with_max_versions(store: S, max_versions: usize) -> Self {
        assert!(max_versions > 0, "A project must keep at least one version");
        Self { store, max_versions }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn key(name: &str) -> String {
        format!("{}{}", PROJECT_PREFIX, name)
    }

    /// Saved versions of `name`, newest first; empty for unknown projects.
    pub fn versions(&self, name: &str) -> Result<Vec<ProjectVersion>> {
        match self.store.get(&Self::key(name)) {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepends a version of `name`, dropping the oldest beyond the limit.
    pub fn save_version(&mut self, name: &str, saved_at: u64, circuit: &Circuit) -> Result<()> {
        let mut versions = self.versions(name)?;
        versions.insert(
            0,
            ProjectVersion {
                saved_at,
                circuit: circuit.clone(),
            },
        );
        versions.truncate(self.max_versions);
        debug!("save_version: {} now has {} versions", name, versions.len());
        self.store.set(&Self::key(name), serde_json::to_string(&versions)?);
        Ok(())
    }

    /// Most recent version of `name`, if any.
    pub fn load_latest(&self, name: &str) -> Result<Option<Circuit>> {
        Ok(self.versions(name)?.into_iter().next().map(|v| v.circuit))
    }

    /// Names of all saved projects, sorted.
    pub fn list_projects(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .store
            .keys()
            .into_iter()
            .filter_map(|key| key.strip_prefix(PROJECT_PREFIX).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.store.remove(&Self::key(name))
    }
}
