//! Thin wrappers over external `cp`/`mv` and child process status checks.
//!
//! The wrappers block until the child exits. There is no timeout.

use crate::core::error::{CellioError, Result};
use crate::core::fs::makedirs;
use log::{debug, info};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Child, Command, Stdio};

fn render_command<S: AsRef<OsStr>>(cmd: &str, args: &[S]) -> String {
    let mut rendered = cmd.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

/// Run `cmd` with `args`, capturing stderr, and fail if it exits non-zero.
pub fn run_command_safely<S: AsRef<OsStr>>(cmd: &str, args: &[S]) -> Result<()> {
    let rendered = render_command(cmd, args);
    debug!("Running: {}", rendered);

    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| CellioError::ExternalProcess {
            command: rendered.clone(),
            code: None,
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(CellioError::ExternalProcess {
            command: rendered,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }
    Ok(())
}

/// Check that a spawned child has exited successfully without blocking on it.
pub fn check_completed_process(child: &mut Child, cmd: &str) -> Result<()> {
    match child.try_wait()? {
        None => Err(CellioError::ProcessNotFinished {
            command: cmd.to_string(),
        }),
        Some(status) if !status.success() => Err(CellioError::ExternalProcess {
            command: cmd.to_string(),
            code: status.code(),
            stderr: String::new(),
        }),
        Some(_) => Ok(()),
    }
}

/// Copy a file with the system `cp`. Not platform-independent.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    run_command_safely("cp", &[src.as_ref().as_os_str(), dst.as_ref().as_os_str()])
}

/// Move a file with the system `mv`. Not platform-independent.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    run_command_safely("mv", &[src.as_ref().as_os_str(), dst.as_ref().as_os_str()])
}

/// Recursively copy a directory, one `cp` per file.
///
/// Only the top-level `dst` honours `allow_existing`; nested directories must
/// not exist yet.
pub fn copytree<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, allow_existing: bool) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    copytree_inner(src, dst, allow_existing)?;
    info!("Copied tree {} -> {}", src.display(), dst.display());
    Ok(())
}

fn copytree_inner(src: &Path, dst: &Path, allow_existing: bool) -> Result<()> {
    makedirs(dst, allow_existing)?;

    let mut entries = fs::read_dir(src)
        .map_err(|e| CellioError::filesystem("list directory", src, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CellioError::filesystem("list directory", src, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let srcname = entry.path();
        let dstname = dst.join(entry.file_name());
        if srcname.is_dir() {
            copytree_inner(&srcname, &dstname, false)?;
        } else {
            copy(&srcname, &dstname)?;
        }
    }
    Ok(())
}
