//! Discovery of manual test sources
//!
//! Walks a search root and collects every regular file beneath it. Nothing is
//! filtered: hidden files, ignore files and extensions are all irrelevant here,
//! since every file under the root is a candidate source for the build.

mod enumerator;

pub use enumerator::{to_workspace_path, EntryNaming, SourceEnumerator, SourceListing};
