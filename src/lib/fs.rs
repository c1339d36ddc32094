//! File helpers shared by the configuration, token cache and export code.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

/// Resolve `path` against `relative_to` unless it is already absolute.
///
/// Returns `None` for an empty value so callers keep the "unset" meaning.
pub fn path_absolute_or_relative(path: &str, relative_to: &Path) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return Some(candidate.to_path_buf());
    }
    Some(relative_to.join(candidate))
}

/// Directory that contains `path`, using `.` for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read a file, mapping "not found" to `None`.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the whole content of `path`.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so concurrent readers see either the old or the
/// new content.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", path.display()),
        ));
    }
    let mut temp = NamedTempFile::new_in(parent_dir(path))?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Write `content` into `path`, refusing to overwrite directories.
pub fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", path.display()),
        ));
    }
    fs::write(path, content)
}

/// True when `path` is a directory the current process can create files in.
///
/// Permission bits alone ignore ownership, so this creates an anonymous
/// temporary file inside the directory instead.
pub fn is_writable_dir(path: &Path) -> bool {
    path.is_dir() && tempfile::tempfile_in(path).is_ok()
}
