use crate::core::error::{CellioError, Result};
use log::debug;

/// Memory reservation assumed to be served by a single thread.
pub const DEFAULT_MEM_GB_PER_THREAD: f64 = 8.0;

/// Thread counts a job may request.
const THREAD_STEPS: [usize; 3] = [1, 2, 4];

/// Translate a memory reservation into a thread request for schedulers that
/// only reserve CPUs. The result is always 1, 2 or 4.
pub fn get_thread_request_from_mem_gb(mem_gb: f64, mem_gb_per_thread: f64) -> Result<usize> {
    if !mem_gb_per_thread.is_finite() || mem_gb_per_thread <= 0.0 {
        return Err(CellioError::InvalidInput(format!(
            "mem_gb_per_thread must be a positive number, got {}",
            mem_gb_per_thread
        )));
    }
    if !mem_gb.is_finite() {
        return Err(CellioError::InvalidInput(format!(
            "mem_gb must be a finite number, got {}",
            mem_gb
        )));
    }

    let est_threads = (mem_gb / mem_gb_per_thread).round();
    let threads = THREAD_STEPS
        .iter()
        .copied()
        .find(|&t| est_threads <= t as f64)
        .unwrap_or(4);
    debug!(
        "{} GB at {} GB/thread -> {} threads",
        mem_gb, mem_gb_per_thread, threads
    );
    Ok(threads)
}
