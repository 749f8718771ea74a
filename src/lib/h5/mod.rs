//! HDF5 string storage
//!
//! - [`xml`]: XML character reference escaping for 7-bit ASCII storage
//! - [`strings`]: the fixed-width string codec, independent of any HDF5 binding
//! - `dataset`: reading and writing codec output through the `hdf5` crate
//!   (enabled with the `hdf5` feature)

#[cfg(feature = "hdf5")]
pub mod dataset;
pub mod strings;
pub mod xml;

#[cfg(feature = "hdf5")]
pub use dataset::{
    create_hdf5_string_dataset, create_hdf5_string_dataset_with, get_h5_filetype, load_array_h5,
    read_hdf5_string_dataset, save_array_h5, set_hdf5_array_attr, set_hdf5_attr,
    set_hdf5_scalar_attr, write_h5, StringDatasetOptions, H5_FILETYPE_KEY,
};
pub use strings::{
    decode_fixed_entry, decode_strings, encode_json_strings, encode_strings, EncodedStrings,
};
