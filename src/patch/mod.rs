//! Source-path injection into the project file
//!
//! The project file is never parsed as XML here. It is a sequence of text
//! lines, and every line containing the anchor fragment gets the generated
//! entries appended right after it. Because the anchor itself is left in
//! place, patching an already patched file inserts the block again unless
//! [`DuplicatePolicy::SkipExisting`] is selected.
//!
//! # Example
//!
//! ```no_run
//! use cproject_inject::config::InjectConfig;
//! use cproject_inject::patch::inject;
//!
//! let config = InjectConfig::new("Manual_Tests/common", "Projects/STM32H743ZITX/.cproject");
//! let report = inject(&config, false)?;
//! println!("inserted {} lines", report.lines_inserted);
//! # Ok::<(), cproject_inject::patch::PatchError>(())
//! ```

mod atomic;
mod entry;
mod error;
mod patcher;

pub use atomic::write_atomic;
pub use entry::{DuplicatePolicy, EntryTemplate, NAME_PLACEHOLDER};
pub use error::PatchError;
pub use patcher::{insert_entries, ConfigPatcher, Insertion, PatchReport};

use crate::config::InjectConfig;
use crate::scan::SourceEnumerator;

/// Discovers the sources under the configured search root and patches the
/// project file with them.
pub fn inject(config: &InjectConfig, dry_run: bool) -> Result<PatchReport, PatchError> {
    let names = SourceEnumerator::new(&config.search_root).declared_names(config.naming);
    let patcher = ConfigPatcher::from_config(config);
    if dry_run {
        patcher.dry_run(&names)
    } else {
        patcher.patch(&names)
    }
}
