//! Read-only structural view of a `.cproject` file
//!
//! Patching treats the project file as plain text. This module parses it as
//! XML to report which source paths a project currently declares and whether
//! any are declared twice, which is what repeated patching produces.

use roxmltree::Document;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Failed to read project file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Project file {path:?} is not well-formed XML: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// One `<entry kind="sourcePath">` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePathEntry {
    pub name: String,
    pub flags: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project_file: PathBuf,
    pub source_paths: Vec<SourcePathEntry>,
    /// Names declared more than once, with their occurrence count
    pub duplicates: BTreeMap<String, usize>,
}

impl ProjectSummary {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}

pub fn inspect(path: &Path) -> Result<ProjectSummary, InspectError> {
    let content = fs::read_to_string(path).map_err(|source| InspectError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let source_paths = source_path_entries(&content).map_err(|err| InspectError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in &source_paths {
        *counts.entry(entry.name.clone()).or_default() += 1;
    }
    counts.retain(|_, count| *count > 1);

    debug!(
        project = %path.display(),
        source_paths = source_paths.len(),
        duplicates = counts.len(),
        "Inspected project file"
    );

    Ok(ProjectSummary {
        project_file: path.to_path_buf(),
        source_paths,
        duplicates: counts,
    })
}

/// Lists source-path entries in document order.
pub fn source_path_entries(content: &str) -> Result<Vec<SourcePathEntry>, roxmltree::Error> {
    let doc = Document::parse(content)?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("entry") && node.attribute("kind") == Some("sourcePath"))
        .filter_map(|node| {
            node.attribute("name").map(|name| SourcePathEntry {
                name: name.to_string(),
                flags: node.attribute("flags").map(str::to_string),
            })
        })
        .collect())
}
