//! Flat re-exports of the helpers most commands need.
//!
//! `core::prelude` carries the complete set; this module keeps call sites short
//! in the binary.

pub use crate::core::concurrency::get_thread_request_from_mem_gb;
pub use crate::core::errors::is_broken_pipe;
pub use crate::core::fs::{make_parent_dirs, makedirs, mkdir, remove};
pub use crate::core::hash::compute_hash_of_file;
pub use crate::core::io::{concatenate_files, concatenate_headered_files};
pub use crate::core::paths::{get_input_path, get_input_paths, get_output_path};
pub use crate::core::process::{copy, copytree, move_path};
