//! Fragment sources for the API documentation
//!
//! A source is one resource namespace holding the root fragment and any
//! number of per-class fragments, all JSON.

use std::fs;
use std::path::PathBuf;

use crate::error::HydraError;

/// Read access to a namespace of JSON fragments
pub trait FragmentSource: Send + Sync {
    /// Raw text of the fragment called `name`
    fn read(&self, name: &str) -> Result<String, HydraError>;

    /// Names of every JSON fragment in the namespace
    fn list(&self) -> Result<Vec<String>, HydraError>;
}

/// Fragments stored as `*.json` files in one directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FragmentSource for DirectorySource {
    fn read(&self, name: &str) -> Result<String, HydraError> {
        let path = self.dir.join(name);
        fs::read_to_string(&path).map_err(|e| HydraError::ResourceRead {
            name: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn list(&self) -> Result<Vec<String>, HydraError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| HydraError::ResourceRead {
            name: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".json") {
                    names.push(name.to_string());
                }
            }
        }

        Ok(names)
    }
}

/// Fragments held in memory, e.g. embedded with `include_str!`
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    fragments: Vec<(String, String)>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment; a later fragment with the same name replaces it
    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let content = content.into();
        match self.fragments.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = content,
            None => self.fragments.push((name, content)),
        }
        self
    }
}

impl FragmentSource for StaticSource {
    fn read(&self, name: &str) -> Result<String, HydraError> {
        self.fragments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| HydraError::ResourceRead {
                name: name.to_string(),
                reason: "no such fragment".to_string(),
            })
    }

    fn list(&self) -> Result<Vec<String>, HydraError> {
        Ok(self
            .fragments
            .iter()
            .map(|(n, _)| n.clone())
            .filter(|n| n.ends_with(".json"))
            .collect())
    }
}
