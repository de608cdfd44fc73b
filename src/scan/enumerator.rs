use ignore::WalkBuilder;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a discovered file is declared in the project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryNaming {
    /// Search root joined with the file's relative path, e.g.
    /// `Manual_Tests/common/stm32/gpio_test.c`
    #[default]
    Workspace,
    /// Path relative to the search root, e.g. `stm32/gpio_test.c`
    RootRelative,
}

impl FromStr for EntryNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workspace" => Ok(Self::Workspace),
            "root" | "root_relative" | "root-relative" => Ok(Self::RootRelative),
            other => Err(format!(
                "Invalid entry naming: {}. Valid options: workspace, root",
                other
            )),
        }
    }
}

impl fmt::Display for EntryNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace => write!(f, "workspace"),
            Self::RootRelative => write!(f, "root"),
        }
    }
}

/// Files discovered under a search root, rendered as declared names
#[derive(Debug, Clone, Serialize)]
pub struct SourceListing {
    pub search_root: String,
    pub naming: EntryNaming,
    pub files: Vec<String>,
}

pub struct SourceEnumerator {
    root: PathBuf,
}

impl SourceEnumerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns every file under the root, relative to it.
    ///
    /// Entries are visited depth-first with siblings sorted by file name, so
    /// the order only depends on the tree's contents. Symlinks to files are
    /// listed; symlinked directories are not descended into. Names that are
    /// not valid UTF-8 cannot be declared and are skipped. A missing or
    /// non-directory root yields an empty list.
    pub fn enumerate(&self) -> Vec<PathBuf> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "Search root does not exist");
            return Vec::new();
        }
        if !self.root.is_dir() {
            warn!(root = %self.root.display(), "Search root is not a directory");
            return Vec::new();
        }

        let start = Instant::now();
        let mut files = Vec::new();

        for result in WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            let is_file = match entry.file_type() {
                Some(ft) if ft.is_symlink() => fs::metadata(entry.path())
                    .map(|meta| meta.is_file())
                    .unwrap_or_else(|err| {
                        debug!(path = %entry.path().display(), error = %err, "Skipping dangling symlink");
                        false
                    }),
                Some(ft) => ft.is_file(),
                None => false,
            };
            if !is_file {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            if rel_path.to_str().is_none() {
                warn!(
                    path = %rel_path.display(),
                    "Skipping file whose name is not valid UTF-8"
                );
                continue;
            }

            debug!(path = %rel_path.display(), "Discovered source file");
            files.push(rel_path.to_path_buf());
        }

        info!(
            root = %self.root.display(),
            files_found = files.len(),
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Source scan completed"
        );

        files
    }

    /// Enumerates and renders each file as the name it is declared under.
    pub fn declared_names(&self, naming: EntryNaming) -> Vec<String> {
        self.enumerate()
            .iter()
            .map(|rel_path| match naming {
                EntryNaming::Workspace => to_workspace_path(&self.root.join(rel_path)),
                EntryNaming::RootRelative => to_workspace_path(rel_path),
            })
            .collect()
    }

    pub fn listing(&self, naming: EntryNaming) -> SourceListing {
        SourceListing {
            search_root: to_workspace_path(&self.root),
            naming,
            files: self.declared_names(naming),
        }
    }
}

/// Renders a path with `/` separators, dropping `.` components.
///
/// Project files use workspace-style paths on every host, so Windows
/// separators are never written out.
pub fn to_workspace_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        let part = match component {
            Component::CurDir => continue,
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::Prefix(prefix) => prefix.as_os_str().to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::Normal(name) => name.to_string_lossy(),
        };
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&part);
    }
    out
}
