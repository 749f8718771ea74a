//! cellio - I/O helpers for single-cell analysis pipelines
//!
//! cellio wraps the small file-handling steps that pipeline stages keep
//! re-implementing: merging per-stage JSON summaries, hashing outputs, copying
//! result directories and stitching sharded tables back together. Every path is
//! validated up front and failures are reported instead of half-written.
//!
//! # Tools
//!
//! - `merge-json`: Shallow-merge JSON objects from several files
//! - `hash`: Print the SHA-1 of a file
//! - `copytree`: Recursively copy a directory via `cp`
//! - `concat`: Concatenate files, optionally sharing one header line
//! - `threads`: Translate a memory reservation into a thread request
//!
//! # Usage
//!
//! ```bash
//! # Merge per-chunk summaries
//! cellio merge-json chunk0.json chunk1.json -o summary.json
//!
//! # Concatenate sharded CSVs that share a header
//! cellio concat shard0.csv shard1.csv -o all.csv --headered
//!
//! # Copy an output directory into an existing destination
//! cellio copytree outs/ /archive/run42 --allow-existing
//! ```

extern crate cellio_lib;
pub mod commands;
use anyhow::Result;
use cellio_lib::utils;
use env_logger::Env;
use log::*;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case", author, about)]
/// File, process and JSON helpers for single-cell pipelines
struct Args {
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(StructOpt)]
enum Subcommand {
    /// Shallow-merge top-level JSON objects
    MergeJson(commands::MergeJsonArgs),
    /// Print the SHA-1 of a file
    Hash(commands::HashArgs),
    /// Recursively copy a directory
    Copytree(commands::CopytreeArgs),
    /// Concatenate files
    Concat(commands::ConcatArgs),
    /// Thread request for a memory reservation
    Threads(commands::ThreadsArgs),
}

impl Subcommand {
    fn run(self) -> Result<()> {
        match self {
            Subcommand::MergeJson(args) => commands::run_merge_json(args)?,
            Subcommand::Hash(args) => commands::run_hash(args)?,
            Subcommand::Copytree(args) => commands::run_copytree(args)?,
            Subcommand::Concat(args) => commands::run_concat(args)?,
            Subcommand::Threads(args) => commands::run_threads(args)?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = Args::from_args().subcommand.run() {
        if utils::is_broken_pipe(&err) {
            std::process::exit(0);
        }
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
