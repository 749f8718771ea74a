//! Path expansion and validation for user-supplied inputs and outputs.
//!
//! Each check returns a [`CellioError`] instead of terminating the process, so
//! the binary decides how to report a bad path.

use crate::core::error::{CellioError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::env;
use std::path::{Component, Path, PathBuf};

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\w+|\{[^}]*\})").expect("valid env var pattern"));

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are expanded. The `~name` form would need a passwd
/// lookup for another account, so it is returned unchanged, as is any path
/// when the home directory cannot be determined.
pub fn expand_user(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}

/// Expand `$VAR` and `${VAR}`. Unset variables are left untouched.
pub fn expand_vars(path: &str) -> String {
    ENV_VAR
        .replace_all(path, |caps: &Captures| {
            let name = caps[1].trim_start_matches('{').trim_end_matches('}');
            env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Lexically normalise a path: drop `.` components and fold `..` into its parent.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Expand `~` and environment variables, then make the path absolute.
pub fn fixpath<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let raw = path.as_ref().to_string_lossy();
    let expanded = PathBuf::from(expand_vars(&expand_user(&raw)));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()?.join(expanded)
    };
    Ok(normalize(&absolute))
}

/// Resolve an input path and check that it exists with the expected kind.
pub fn get_input_path<P: AsRef<Path>>(path: P, is_dir: bool) -> Result<PathBuf> {
    let path = fixpath(path)?;
    if !path.exists() {
        return Err(CellioError::InputNotFound(path));
    }
    if is_dir {
        if !path.is_dir() {
            return Err(CellioError::ExpectedDirectory(path));
        }
    } else if !path.is_file() {
        return Err(CellioError::ExpectedFile(path));
    }
    Ok(path)
}

/// Resolve several input file paths; the first invalid one is reported.
pub fn get_input_paths<I, P>(paths: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| get_input_path(p, false))
        .collect()
}

/// Resolve an output path whose parent directory must already exist.
pub fn get_output_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = fixpath(path)?;
    let dirname = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));
    if !dirname.exists() {
        return Err(CellioError::OutputDirMissing(dirname));
    }
    if !dirname.is_dir() {
        return Err(CellioError::OutputParentNotDirectory(dirname));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_expand_vars() {
        env::set_var("CELLIO_TEST_ROOT", "/data");
        assert_eq!(expand_vars("$CELLIO_TEST_ROOT/x"), "/data/x");
        assert_eq!(expand_vars("${CELLIO_TEST_ROOT}/y"), "/data/y");
        assert_eq!(
            expand_vars("$CELLIO_TEST_UNSET_VARIABLE/z"),
            "$CELLIO_TEST_UNSET_VARIABLE/z"
        );
    }

    #[test]
    fn test_expand_user() {
        assert_eq!(expand_user("/abs/~/x"), "/abs/~/x");
        assert_eq!(expand_user("~user/x"), "~user/x");
        assert_eq!(expand_user("~root"), "~root");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_user("~/x"), format!("{}/x", home.display()));
        }
    }

    #[test]
    fn test_fixpath_is_absolute() {
        let fixed = fixpath("some/relative/../path").unwrap();
        assert!(fixed.is_absolute());
        assert!(fixed.ends_with("some/path"));
    }

    #[test]
    fn test_get_input_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("in.txt");
        fs::write(&file, b"x").unwrap();

        assert_eq!(get_input_path(&file, false).unwrap(), file);
        assert_eq!(get_input_path(dir.path(), true).unwrap(), dir.path());

        assert!(matches!(
            get_input_path(dir.path().join("missing"), false),
            Err(CellioError::InputNotFound(_))
        ));
        assert!(matches!(
            get_input_path(&file, true),
            Err(CellioError::ExpectedDirectory(_))
        ));
        assert!(matches!(
            get_input_path(dir.path(), false),
            Err(CellioError::ExpectedFile(_))
        ));
    }

    #[test]
    fn test_get_input_paths_reports_first_failure() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, b"x").unwrap();
        let bad = dir.path().join("bad.txt");

        let paths = get_input_paths([&good]).unwrap();
        assert_eq!(paths, vec![good.clone()]);

        match get_input_paths([&good, &bad]) {
            Err(CellioError::InputNotFound(p)) => assert_eq!(p, bad),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_get_output_path() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.json");
        assert_eq!(get_output_path(&out).unwrap(), out);

        assert!(matches!(
            get_output_path(dir.path().join("missing/out.json")),
            Err(CellioError::OutputDirMissing(_))
        ));

        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            get_output_path(file.join("out.json")),
            Err(CellioError::OutputParentNotDirectory(_))
        ));
    }
}
