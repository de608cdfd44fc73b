use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Placeholder substituted with the declared file name
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Shape of a generated source-path line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTemplate {
    template: String,
}

impl EntryTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn has_placeholder(&self) -> bool {
        self.template.contains(NAME_PLACEHOLDER)
    }

    /// Substitutes `name` verbatim. No XML escaping is applied.
    pub fn render(&self, name: &str) -> String {
        self.template.replace(NAME_PLACEHOLDER, name)
    }
}

impl Default for EntryTemplate {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ENTRY_TEMPLATE)
    }
}

/// What to do with entries that are already present in the project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Insert every entry after every anchor, even if an identical line exists.
    /// Patching twice therefore repeats the block.
    #[default]
    Append,
    /// Leave out entries whose rendered line already occurs in the file.
    SkipExisting,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "skip" | "skip_existing" | "skip-existing" => Ok(Self::SkipExisting),
            other => Err(format!(
                "Invalid duplicate policy: {}. Valid options: append, skip-existing",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::SkipExisting => write!(f, "skip-existing"),
        }
    }
}
