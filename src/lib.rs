//! cproject-inject - declares manual test sources in an Eclipse CDT project
//!
//! The embedded build for the STM32H743ZITX board only compiles what its
//! `.cproject` file lists as source paths. This crate walks a directory of
//! manual test sources and inserts one source-path entry per file right after
//! an existing anchor entry, so the next build picks them up.
//!
//! # Example Usage
//!
//! ```no_run
//! use cproject_inject::{inject, InjectConfig};
//!
//! let config = InjectConfig::new("Manual_Tests/common", "Projects/STM32H743ZITX/.cproject");
//! config.validate()?;
//! let report = inject(&config, false)?;
//! println!("{} entries inserted", report.lines_inserted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: discovery of source files under a search root
//! - [`patch`]: line-oriented insertion and atomic rewrite of the project file
//! - [`project`]: read-only XML inspection of declared source paths
//! - [`config`]: paths and literals, with environment overrides
//! - [`cli`]: command-line surface

pub mod cli;
pub mod config;
pub mod patch;
pub mod project;
pub mod scan;
pub mod util;

pub use config::{ConfigError, InjectConfig};
pub use patch::{inject, ConfigPatcher, DuplicatePolicy, EntryTemplate, PatchError, PatchReport};
pub use project::{inspect, InspectError, ProjectSummary};
pub use scan::{EntryNaming, SourceEnumerator};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
