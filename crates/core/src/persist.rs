//! Crash-safe file writes shared by the cache and the usage journal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `content` to a sibling `.tmp` file, then rename it over `path`.
///
/// Missing parent directories are created. Readers never observe a
/// truncated file.
pub(crate) fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)
}
