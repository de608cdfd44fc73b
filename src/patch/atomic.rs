//! Temp-file-and-rename replacement of a file's contents

use super::PatchError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Replaces `path` with `content` without ever leaving it half written.
///
/// The temporary file lives next to the target so the final rename stays on
/// one filesystem. The target's permissions are carried over.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PatchError> {
    let write_err = |source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path).map_err(write_err)?.permissions();

    let mut tmp = tempfile::Builder::new()
        .prefix(".cproject-inject-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;

    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.as_file().set_permissions(permissions).map_err(write_err)?;

    debug!(tmp = %tmp.path().display(), target = %path.display(), "Renaming patched file into place");
    tmp.persist(path).map_err(|err| write_err(err.error))?;

    Ok(())
}
