//! Output formatting for command results
//!
//! Every command result can be rendered as JSON, YAML or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::InjectConfig;
use crate::patch::PatchReport;
use crate::project::ProjectSummary;
use crate::scan::SourceListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &PatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "patch report"),
            OutputFormat::Yaml => to_yaml(report, "patch report"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_listing(&self, listing: &SourceListing) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(listing, "source listing"),
            OutputFormat::Yaml => to_yaml(listing, "source listing"),
            OutputFormat::Human => Ok(listing.files.join("\n")),
        }
    }

    pub fn format_summary(&self, summary: &ProjectSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(summary, "project summary"),
            OutputFormat::Yaml => to_yaml(summary, "project summary"),
            OutputFormat::Human => Ok(self.format_summary_human(summary)),
        }
    }

    pub fn format_config(&self, config: &InjectConfig) -> Result<String> {
        let map = config.to_display_map();
        match self.format {
            OutputFormat::Json => to_json(&map, "config"),
            OutputFormat::Yaml => to_yaml(&map, "config"),
            OutputFormat::Human => Ok(map
                .iter()
                .map(|(key, value)| format!("{:<15} {}", key, value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_report_human(&self, report: &PatchReport) -> String {
        let mut output = String::new();
        output.push_str(&format!("Project:          {}\n", report.project_file.display()));
        output.push_str(&format!("Files discovered: {}\n", report.files_discovered));
        output.push_str(&format!("Anchors matched:  {}\n", report.anchors_matched));
        output.push_str(&format!("Lines inserted:   {}\n", report.lines_inserted));
        if report.entries_skipped > 0 {
            output.push_str(&format!("Entries skipped:  {}\n", report.entries_skipped));
        }

        let status = if report.dry_run {
            "dry run, nothing written"
        } else if report.written {
            "written"
        } else {
            "unchanged"
        };
        output.push_str(&format!("Status:           {}", status));
        output
    }

    fn format_summary_human(&self, summary: &ProjectSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} source path(s) in {}\n",
            summary.source_paths.len(),
            summary.project_file.display()
        ));
        for entry in &summary.source_paths {
            output.push_str(&format!("  {}\n", entry.name));
        }

        if summary.is_clean() {
            output.push_str("No duplicate entries");
        } else {
            output.push_str("Duplicate entries:");
            for (name, count) in &summary.duplicates {
                output.push_str(&format!("\n  {} (x{})", name, count));
            }
        }
        output
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
