use anyhow::Result;
use cellio_lib::core::concurrency::DEFAULT_MEM_GB_PER_THREAD;
use cellio_lib::utils;
use structopt::StructOpt;

use crate::commands::common;

/// CLI arguments for the `threads` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "threads")]
pub struct ThreadsArgs {
    /// Memory reservation of the job, in GB.
    #[structopt(long)]
    pub mem_gb: f64,

    /// Memory a single thread is expected to cover, in GB.
    #[structopt(long)]
    pub mem_gb_per_thread: Option<f64>,
}

/// Print the thread request (1, 2 or 4) for a memory reservation.
pub fn run_threads(args: ThreadsArgs) -> Result<()> {
    let per_thread = args.mem_gb_per_thread.unwrap_or(DEFAULT_MEM_GB_PER_THREAD);
    let threads = utils::get_thread_request_from_mem_gb(args.mem_gb, per_thread)?;
    common::emit_line(&threads.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_memory_arguments() {
        let args = ThreadsArgs::from_iter_safe(&["threads", "--mem-gb", "24"]).unwrap();
        assert_eq!(args.mem_gb, 24.0);
        assert_eq!(args.mem_gb_per_thread, None);

        let args = ThreadsArgs::from_iter_safe(&[
            "threads",
            "--mem-gb",
            "24",
            "--mem-gb-per-thread",
            "4",
        ])
        .unwrap();
        assert_eq!(args.mem_gb_per_thread, Some(4.0));
    }
}
