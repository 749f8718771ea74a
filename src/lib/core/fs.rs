use crate::core::error::{CellioError, Result};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Create parent directories for a path when missing.
pub fn make_parent_dirs<P: AsRef<Path>>(path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| CellioError::filesystem("create directory", parent, e))?;
        }
    }
    Ok(())
}

/// Create a single directory.
///
/// With `allow_existing`, an existing *directory* at `dst` counts as success.
/// Transient NFS hiccups can make a retried create observe its own earlier
/// success, which is what this mode is for. An existing regular file is still
/// an error.
pub fn mkdir<P: AsRef<Path>>(dst: P, allow_existing: bool) -> Result<()> {
    let dst = dst.as_ref();
    debug!("mkdir {}", dst.display());
    match fs::create_dir(dst) {
        Ok(()) => Ok(()),
        Err(e) if allow_existing && e.kind() == ErrorKind::AlreadyExists && dst.is_dir() => {
            warn!("Directory already exists, continuing: {}", dst.display());
            Ok(())
        }
        Err(e) => Err(CellioError::filesystem("create directory", dst, e)),
    }
}

/// Create a directory and all of its missing parents.
///
/// Unlike [`fs::create_dir_all`], an existing target is an error unless
/// `allow_existing` is set. Only the parents are created leniently; the
/// target itself goes through [`mkdir`], so a directory that appears
/// concurrently is still reported.
pub fn makedirs<P: AsRef<Path>>(dst: P, allow_existing: bool) -> Result<()> {
    let dst = dst.as_ref();
    debug!("makedirs {}", dst.display());
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CellioError::filesystem("create directory", parent, e))?;
    }
    mkdir(dst, allow_existing)
}

/// Delete a file. With `allow_nonexisting`, a missing file counts as success.
pub fn remove<P: AsRef<Path>>(path: P, allow_nonexisting: bool) -> Result<()> {
    let path = path.as_ref();
    debug!("remove {}", path.display());
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if allow_nonexisting && e.kind() == ErrorKind::NotFound => {
            warn!("File already absent, continuing: {}", path.display());
            Ok(())
        }
        Err(e) => Err(CellioError::filesystem("remove", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mkdir_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");

        mkdir(&target, true).unwrap();
        mkdir(&target, true).unwrap();

        assert!(target.is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_mkdir_strict_fails_on_existing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");

        mkdir(&target, false).unwrap();
        let err = mkdir(&target, false).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::AlreadyExists));
    }

    #[test]
    fn test_mkdir_allow_existing_rejects_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("file");
        fs::write(&target, b"x").unwrap();

        assert!(mkdir(&target, true).is_err());
    }

    #[test]
    fn test_makedirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/c");

        makedirs(&target, false).unwrap();
        assert!(target.is_dir());
        assert!(makedirs(&target, false).is_err());
        makedirs(&target, true).unwrap();
    }

    #[test]
    fn test_makedirs_strict_reports_existing_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b");
        fs::create_dir_all(&target).unwrap();

        let err = makedirs(&target, false).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::AlreadyExists));

        // Existing parents are fine; only the leaf must be new.
        makedirs(target.join("c"), false).unwrap();
        assert!(target.join("c").is_dir());

        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        assert!(makedirs(&file, true).is_err());
        assert!(makedirs(file.join("under"), true).is_err());
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("file.txt");
        fs::write(&target, b"x").unwrap();

        remove(&target, false).unwrap();
        assert!(!target.exists());

        remove(&target, true).unwrap();
        let err = remove(&target, false).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_make_parent_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested/deeper/file.txt");

        make_parent_dirs(&target).unwrap();
        assert!(dir.path().join("nested/deeper").is_dir());
        make_parent_dirs("relative.txt").unwrap();
    }
}
