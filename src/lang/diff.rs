//! New-string extraction between two snapshots of the reference locale.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::lang::{LangMap, LoadError, is_tracked, loader};

/// What: Keys present in `new` but not in `old`, restricted to tracked keys.
///
/// Inputs:
/// - `old`: Previous snapshot.
/// - `new`: Current snapshot.
///
/// Output:
/// - Entries of `new` whose key is absent from `old` and accepted by
///   [`is_tracked`].
#[must_use]
pub fn diff_keys(old: &LangMap, new: &LangMap) -> LangMap {
    new.iter()
        .filter(|(key, _)| !old.contains_key(*key) && is_tracked(key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// What: Write a diff snapshot as pretty JSON.
///
/// Inputs:
/// - `path`: Destination file.
/// - `diff`: Entries to write.
///
/// # Errors
/// - `LoadError::Io` when the file cannot be written.
///
/// Details:
/// - Four-space indentation; non-ASCII text is written as-is.
pub fn write_snapshot(path: &Path, diff: &LangMap) -> Result<(), LoadError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    diff.serialize(&mut ser).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    buf.push(b'\n');
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| LoadError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, buf).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// What: Read a diff snapshot written by [`write_snapshot`].
///
/// Inputs:
/// - `path`: Snapshot file.
///
/// Output:
/// - The snapshot entries.
///
/// # Errors
/// - `LoadError::NotFound` when no snapshot exists; run `--diff` first.
pub fn read_snapshot(path: &Path) -> Result<LangMap, LoadError> {
    loader::load_json_map(path)
}
