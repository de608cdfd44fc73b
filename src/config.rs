//! Configuration for cproject-inject
//!
//! Every path and literal the tool works with is a parameter. Defaults match
//! the STM32H743ZITX workspace layout, and each can be overridden from the
//! environment or from the command line.
//!
//! # Environment Variables
//!
//! - `CPROJECT_INJECT_SEARCH_ROOT`: directory scanned for sources - default: "Manual_Tests/common"
//! - `CPROJECT_INJECT_PROJECT`: project file to patch - default: "Projects/STM32H743ZITX/.cproject"
//! - `CPROJECT_INJECT_ANCHOR`: line fragment entries are inserted after
//! - `CPROJECT_INJECT_TEMPLATE`: generated line, with `{name}` as placeholder
//! - `CPROJECT_INJECT_NAMING`: declared name style (workspace|root) - default: "workspace"
//! - `CPROJECT_INJECT_SKIP_EXISTING`: skip entries already present (true|false) - default: "false"
//!
//! Logging is configured separately, see [`crate::util::logging`].

use crate::patch::{DuplicatePolicy, EntryTemplate, NAME_PLACEHOLDER};
use crate::scan::EntryNaming;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SEARCH_ROOT: &str = "Manual_Tests/common";
pub const DEFAULT_PROJECT_FILE: &str = "Projects/STM32H743ZITX/.cproject";
pub const DEFAULT_ANCHOR: &str =
    r#"<entry flags="VALUE_WORKSPACE_PATH" kind="sourcePath" name="Src"/>"#;
pub const DEFAULT_ENTRY_TEMPLATE: &str =
    r#"<entry flags="VALUE_WORKSPACE_PATH" kind="sourcePath" name="{name}"/>"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct InjectConfig {
    /// Directory whose files become source-path entries
    pub search_root: PathBuf,

    /// Project file rewritten in place
    pub project_file: PathBuf,

    /// Fragment identifying the insertion line
    pub anchor: String,

    /// Generated line, `{name}` replaced by the declared name
    pub entry_template: String,

    pub naming: EntryNaming,

    pub duplicates: DuplicatePolicy,
}

impl Default for InjectConfig {
    /// Loads `CPROJECT_INJECT_*` variables, falling back to the built-in
    /// defaults for anything unset or unparsable.
    fn default() -> Self {
        let mut config = Self::new(DEFAULT_SEARCH_ROOT, DEFAULT_PROJECT_FILE);

        if let Ok(root) = env::var("CPROJECT_INJECT_SEARCH_ROOT") {
            config.search_root = PathBuf::from(root);
        }
        if let Ok(project) = env::var("CPROJECT_INJECT_PROJECT") {
            config.project_file = PathBuf::from(project);
        }
        if let Ok(anchor) = env::var("CPROJECT_INJECT_ANCHOR") {
            config.anchor = anchor;
        }
        if let Ok(template) = env::var("CPROJECT_INJECT_TEMPLATE") {
            config.entry_template = template;
        }

        config.naming = env::var("CPROJECT_INJECT_NAMING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let skip_existing = env::var("CPROJECT_INJECT_SKIP_EXISTING")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);
        if skip_existing {
            config.duplicates = DuplicatePolicy::SkipExisting;
        }

        config
    }
}

impl InjectConfig {
    /// Builds a configuration for explicit paths, ignoring the environment.
    pub fn new(search_root: impl Into<PathBuf>, project_file: impl Into<PathBuf>) -> Self {
        Self {
            search_root: search_root.into(),
            project_file: project_file.into(),
            anchor: DEFAULT_ANCHOR.to_string(),
            entry_template: DEFAULT_ENTRY_TEMPLATE.to_string(),
            naming: EntryNaming::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_naming(mut self, naming: EntryNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Checks that the anchor and template can produce line-shaped output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anchor.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Anchor must not be empty".to_string(),
            ));
        }
        if self.anchor.contains('\n') || self.anchor.contains('\r') {
            return Err(ConfigError::ValidationFailed(
                "Anchor must fit on a single line".to_string(),
            ));
        }
        if !EntryTemplate::new(self.entry_template.as_str()).has_placeholder() {
            return Err(ConfigError::ValidationFailed(format!(
                "Entry template must contain the {} placeholder",
                NAME_PLACEHOLDER
            )));
        }
        if self.entry_template.contains('\n') || self.entry_template.contains('\r') {
            return Err(ConfigError::ValidationFailed(
                "Entry template must fit on a single line".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective settings as display strings, keyed by setting name
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            "search_root".to_string(),
            self.search_root.display().to_string(),
        );
        map.insert(
            "project_file".to_string(),
            self.project_file.display().to_string(),
        );
        map.insert("anchor".to_string(), self.anchor.clone());
        map.insert("entry_template".to_string(), self.entry_template.clone());
        map.insert("naming".to_string(), self.naming.to_string());
        map.insert("duplicates".to_string(), self.duplicates.to_string());
        map
    }
}
