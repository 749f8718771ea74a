use anyhow::Result;
use cellio_lib::core::hash::{DEFAULT_HASH_BLOCK_SIZE, DEFAULT_HASH_BLOCK_SIZE_STR};
use cellio_lib::utils;
use log::debug;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::commands::common;

/// CLI arguments for the `hash` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "hash")]
pub struct HashArgs {
    /// File to hash.
    pub input: PathBuf,

    /// Bytes read per block.
    #[structopt(long, short = "b", default_value = DEFAULT_HASH_BLOCK_SIZE_STR.as_str())]
    pub block_size: usize,
}

/// Print the SHA-1 of a file as `<digest>  <path>`.
pub fn run_hash(args: HashArgs) -> Result<()> {
    let input = utils::get_input_path(&args.input, false)?;
    if args.block_size != DEFAULT_HASH_BLOCK_SIZE {
        debug!("Hashing with a block size of {} bytes", args.block_size);
    }
    let digest = utils::compute_hash_of_file(&input, args.block_size)?;
    common::emit_line(&format!("{}  {}", digest, input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_block_size() {
        let args = HashArgs::from_iter_safe(&["hash", "reads.bam"]).unwrap();
        assert_eq!(args.input, PathBuf::from("reads.bam"));
        assert_eq!(args.block_size, DEFAULT_HASH_BLOCK_SIZE);
        assert_eq!(DEFAULT_HASH_BLOCK_SIZE_STR.parse::<usize>().unwrap(), DEFAULT_HASH_BLOCK_SIZE);
    }

    #[test]
    fn parses_explicit_block_size() {
        let args = HashArgs::from_iter_safe(&["hash", "reads.bam", "-b", "4096"]).unwrap();
        assert_eq!(args.block_size, 4096);
    }
}
