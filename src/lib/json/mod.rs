//! JSON helpers
//!
//! - [`merge`]: shallow merging of top-level JSON objects spread across files

pub mod merge;

pub use merge::{json_type_name, json_values_equal, merge_json_values, merge_jsons_single_level, write_json};
