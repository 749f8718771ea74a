pub mod concurrency;
pub mod error;
pub mod errors;
pub mod fs;
pub mod hash;
pub mod io;
pub mod paths;
pub mod process;

pub mod prelude {
    pub use super::concurrency::{get_thread_request_from_mem_gb, DEFAULT_MEM_GB_PER_THREAD};
    pub use super::error::{CellioError, Result};
    pub use super::errors::is_broken_pipe;
    pub use super::fs::{make_parent_dirs, makedirs, mkdir, remove};
    pub use super::hash::{compute_hash_of_file, DEFAULT_HASH_BLOCK_SIZE};
    pub use super::io::{
        concatenate_files, concatenate_headered_files, create_maybe_compressed,
        load_csv_rownames, open_maybe_compressed, write_empty_json, CompressionKind,
        CompressionSuffixes, MaybeCompressedWriter,
    };
    pub use super::paths::{fixpath, get_input_path, get_input_paths, get_output_path};
    pub use super::process::{
        check_completed_process, copy, copytree, move_path, run_command_safely,
    };
}
