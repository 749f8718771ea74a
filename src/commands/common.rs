use anyhow::Result;
use std::io::{self, Write};

/// Print a single result line to stdout.
///
/// Broken pipes propagate so `main` can exit quietly when piped into `head`.
pub fn emit_line(line: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", line)?;
    handle.flush()?;
    Ok(())
}
