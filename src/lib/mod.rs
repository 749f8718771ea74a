//! cellio: I/O helpers for single-cell analysis pipelines
//!
//! The library gathers the small pieces of plumbing that pipeline stages share:
//! 1. Validation of user-supplied input and output paths
//! 2. Idempotent directory creation and file removal
//! 3. Safe `cp`/`mv` wrappers and recursive directory copies
//! 4. Transparent gzip/LZ4 reading and writing, file concatenation, hashing
//! 5. Shallow merging of JSON summary files
//! 6. A 7-bit ASCII string codec for HDF5 datasets
//!
//! # Modules
//!
//! - [`core`]: errors, paths, filesystem, subprocess and stream helpers
//! - [`json`]: JSON object merging
//! - [`h5`]: string codec and, with the `hdf5` feature, HDF5 adapters
//! - [`utils`]: flat re-exports of the most used helpers

pub mod core;
pub mod h5;
pub mod json;
pub mod utils;
