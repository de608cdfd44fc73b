//! Command handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 when the
//! operation failed, 2 for invalid configuration.

use super::commands::{CheckArgs, ConfigArgs, ListArgs, PatchArgs};
use super::output::OutputFormatter;
use crate::config::InjectConfig;
use crate::patch::inject;
use crate::project::inspect;
use crate::scan::SourceEnumerator;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

pub fn handle_patch(args: &PatchArgs, mut config: InjectConfig) -> i32 {
    args.apply(&mut config);
    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return EXIT_CONFIG;
    }

    debug!(
        search_root = %config.search_root.display(),
        project = %config.project_file.display(),
        naming = %config.naming,
        duplicates = %config.duplicates,
        "Patching project file"
    );

    let report = match inject(&config, args.dry_run) {
        Ok(report) => report,
        Err(e) => {
            error!("Patch failed: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    print_output(OutputFormatter::new(args.format.into()).format_report(&report))
}

pub fn handle_list(args: &ListArgs, mut config: InjectConfig) -> i32 {
    args.source.apply(&mut config);

    let listing = SourceEnumerator::new(&config.search_root).listing(config.naming);
    info!(files = listing.files.len(), "Listed source files");

    print_output(OutputFormatter::new(args.format.into()).format_listing(&listing))
}

pub fn handle_check(args: &CheckArgs, mut config: InjectConfig) -> i32 {
    args.project.apply(&mut config);

    let summary = match inspect(&config.project_file) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Inspection failed: {}", e);
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let code = print_output(OutputFormatter::new(args.format.into()).format_summary(&summary));
    if code == EXIT_SUCCESS && !summary.is_clean() {
        return EXIT_FAILURE;
    }
    code
}

pub fn handle_config(args: &ConfigArgs, config: InjectConfig) -> i32 {
    print_output(OutputFormatter::new(args.format.into()).format_config(&config))
}

fn print_output(output: anyhow::Result<String>) -> i32 {
    match output {
        Ok(text) => {
            println!("{}", text);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}
