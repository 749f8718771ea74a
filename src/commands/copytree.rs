use anyhow::{Context, Result};
use cellio_lib::utils;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `copytree` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "copytree")]
pub struct CopytreeArgs {
    /// Directory to copy.
    pub src: PathBuf,

    /// Destination directory. Its parent must exist.
    pub dst: PathBuf,

    /// Succeed when the destination directory already exists.
    #[structopt(long, short = "e")]
    pub allow_existing: bool,
}

/// Recursively copy a directory with one `cp` per file.
pub fn run_copytree(args: CopytreeArgs) -> Result<()> {
    let src = utils::get_input_path(&args.src, true)?;
    let dst = utils::get_output_path(&args.dst)?;

    info!("Copying {:?} -> {:?}", src, dst);
    utils::copytree(&src, &dst, args.allow_existing)
        .with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;
    Ok(())
}
