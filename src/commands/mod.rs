pub mod common;
pub mod concat;
pub mod copytree;
pub mod hash;
pub mod merge_json;
pub mod threads;

pub use concat::{run_concat, ConcatArgs};
pub use copytree::{run_copytree, CopytreeArgs};
pub use hash::{run_hash, HashArgs};
pub use merge_json::{run_merge_json, MergeJsonArgs};
pub use threads::{run_threads, ThreadsArgs};
