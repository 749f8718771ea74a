use anyhow::Error;
use std::io;

use crate::core::error::CellioError;

/// Returns `true` if the error originated from a broken pipe.
#[inline]
pub fn is_broken_pipe(err: &Error) -> bool {
    let root = err.root_cause();
    if let Some(io_err) = root.downcast_ref::<io::Error>() {
        return io_err.kind() == io::ErrorKind::BrokenPipe;
    }
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<CellioError>())
        .any(|cellio_err| cellio_err.io_kind() == Some(io::ErrorKind::BrokenPipe))
}
