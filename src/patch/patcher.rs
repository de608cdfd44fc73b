use super::atomic::write_atomic;
use super::{DuplicatePolicy, EntryTemplate, PatchError};
use crate::config::InjectConfig;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of one patch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub project_file: PathBuf,
    pub files_discovered: usize,
    pub anchors_matched: usize,
    pub lines_inserted: usize,
    pub entries_skipped: usize,
    pub written: bool,
    pub dry_run: bool,
}

/// Result of applying the insertion rule to a text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    pub anchors_matched: usize,
    pub lines_inserted: usize,
    pub entries_skipped: usize,
}

impl Insertion {
    pub fn changed(&self) -> bool {
        self.lines_inserted > 0
    }
}

/// Rewrites a project file so each anchor line is followed by generated entries
pub struct ConfigPatcher {
    project_file: PathBuf,
    anchor: String,
    template: EntryTemplate,
    duplicates: DuplicatePolicy,
}

impl ConfigPatcher {
    pub fn new(project_file: impl Into<PathBuf>, anchor: impl Into<String>) -> Self {
        Self {
            project_file: project_file.into(),
            anchor: anchor.into(),
            template: EntryTemplate::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn from_config(config: &InjectConfig) -> Self {
        Self::new(&config.project_file, &config.anchor)
            .with_template(EntryTemplate::new(&config.entry_template))
            .with_duplicate_policy(config.duplicates)
    }

    pub fn with_template(mut self, template: EntryTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Inserts one entry per name after every anchor line and writes the file.
    ///
    /// The file is left untouched when there is nothing to insert.
    pub fn patch(&self, names: &[String]) -> Result<PatchReport, PatchError> {
        self.run(names, false)
    }

    /// Computes the same report as [`patch`](Self::patch) without writing.
    pub fn dry_run(&self, names: &[String]) -> Result<PatchReport, PatchError> {
        self.run(names, true)
    }

    fn run(&self, names: &[String], dry_run: bool) -> Result<PatchReport, PatchError> {
        let content = self.read_project()?;
        let insertion = insert_entries(
            &content,
            &self.anchor,
            &self.template,
            names,
            self.duplicates,
        );

        if insertion.anchors_matched == 0 {
            warn!(
                project = %self.project_file.display(),
                anchor = %self.anchor,
                "Anchor line not found, project file left unchanged"
            );
        }

        let written = insertion.changed() && !dry_run;
        if written {
            self.ensure_writable()?;
            write_atomic(&self.project_file, &insertion.content)?;
        }

        info!(
            project = %self.project_file.display(),
            files = names.len(),
            anchors = insertion.anchors_matched,
            inserted = insertion.lines_inserted,
            skipped = insertion.entries_skipped,
            written,
            dry_run,
            "Patch completed"
        );

        Ok(PatchReport {
            project_file: self.project_file.clone(),
            files_discovered: names.len(),
            anchors_matched: insertion.anchors_matched,
            lines_inserted: insertion.lines_inserted,
            entries_skipped: insertion.entries_skipped,
            written,
            dry_run,
        })
    }

    fn read_project(&self) -> Result<String, PatchError> {
        if !self.project_file.exists() {
            return Err(PatchError::NotFound(self.project_file.clone()));
        }
        if !self.project_file.is_file() {
            return Err(PatchError::NotAFile(self.project_file.clone()));
        }
        fs::read_to_string(&self.project_file).map_err(|source| PatchError::Read {
            path: self.project_file.clone(),
            source,
        })
    }

    fn ensure_writable(&self) -> Result<(), PatchError> {
        let metadata = fs::metadata(&self.project_file).map_err(|source| PatchError::Read {
            path: self.project_file.clone(),
            source,
        })?;
        if metadata.permissions().readonly() {
            return Err(PatchError::ReadOnly(self.project_file.clone()));
        }

        // The rename in write_atomic ignores the target's mode, so the mode
        // bits alone do not say whether this user may write it.
        match fs::OpenOptions::new().write(true).open(&self.project_file) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                Err(PatchError::ReadOnly(self.project_file.clone()))
            }
            Err(source) => Err(PatchError::Write {
                path: self.project_file.clone(),
                source,
            }),
        }
    }
}

/// Applies the insertion rule to `content`.
///
/// Every line containing `anchor` is kept as is and followed by one rendered
/// entry per name, in order. Inserted lines copy the anchor line's indentation
/// and terminator. Every other byte passes through unchanged.
pub fn insert_entries(
    content: &str,
    anchor: &str,
    template: &EntryTemplate,
    names: &[String],
    duplicates: DuplicatePolicy,
) -> Insertion {
    let rendered: Vec<String> = names.iter().map(|name| template.render(name)).collect();

    let entries: Vec<&str> = match duplicates {
        DuplicatePolicy::Append => rendered.iter().map(String::as_str).collect(),
        DuplicatePolicy::SkipExisting => {
            let existing: HashSet<&str> = content.lines().map(str::trim).collect();
            rendered
                .iter()
                .map(String::as_str)
                .filter(|entry| !existing.contains(entry.trim()))
                .collect()
        }
    };
    let entries_skipped = rendered.len() - entries.len();

    let fallback_eol = dominant_line_ending(content);
    let mut out = String::with_capacity(content.len());
    let mut anchors_matched = 0;

    for line in content.split_inclusive('\n') {
        if anchor.is_empty() || !line.contains(anchor) {
            out.push_str(line);
            continue;
        }

        anchors_matched += 1;
        let (body, terminator) = split_terminator(line);
        let indent = &body[..body.len() - body.trim_start().len()];
        let separator = if terminator.is_empty() {
            fallback_eol
        } else {
            terminator
        };

        out.push_str(body);
        for entry in &entries {
            out.push_str(separator);
            out.push_str(indent);
            out.push_str(entry);
        }
        out.push_str(terminator);
    }

    let lines_inserted = anchors_matched * entries.len();
    if lines_inserted > 0 {
        debug!(anchors_matched, lines_inserted, "Inserted source-path entries");
    }

    Insertion {
        content: out,
        anchors_matched,
        lines_inserted,
        entries_skipped,
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn dominant_line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
