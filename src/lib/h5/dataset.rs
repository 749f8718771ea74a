//! HDF5 adapters for the string codec and a few root-level helpers.

use crate::core::error::{CellioError, Result};
use crate::h5::strings::{decode_fixed_entry, decode_strings, EncodedStrings};
use hdf5::types::{TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Dataset, Extents, File, Group, H5Type, Location};
use hdf5_sys::h5a::H5Aread;
use hdf5_sys::h5d::{H5Dread, H5Dwrite};
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5s::H5S_ALL;
use log::debug;
use std::path::Path;

/// Root attribute naming the kind of file a pipeline stage wrote.
pub const H5_FILETYPE_KEY: &str = "filetype";

fn check_status(status: i32, what: &str, name: &str) -> Result<()> {
    if status < 0 {
        return Err(hdf5::Error::Internal(format!("{} failed for '{}'", what, name)).into());
    }
    Ok(())
}

fn fixed_width(descriptor: &TypeDescriptor, name: &str) -> Result<usize> {
    match descriptor {
        TypeDescriptor::FixedAscii(width) | TypeDescriptor::FixedUnicode(width) => Ok(*width),
        other => Err(CellioError::InvalidInput(format!(
            "'{}' is not a fixed-length string ({:?})",
            name, other
        ))),
    }
}

/// Storage options for string datasets. Chunking and filters apply only to
/// non-empty datasets; a null dataspace cannot be chunked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringDatasetOptions {
    /// Gzip level (0-9). Turns on chunking.
    pub deflate: Option<u8>,
    /// Byte shuffle ahead of compression.
    pub shuffle: bool,
    /// Entries per chunk, capped at the dataset length.
    pub chunk: Option<usize>,
}

/// Write encoded strings as a dataset under `group`, with default storage.
///
/// [`EncodedStrings::Null`] becomes a null-dataspace dataset of width 1, so
/// readers can tell "no elements" apart from a dataset of empty strings.
pub fn create_hdf5_string_dataset(
    group: &Group,
    name: &str,
    data: &EncodedStrings,
) -> Result<Dataset> {
    create_hdf5_string_dataset_with(group, name, data, &StringDatasetOptions::default())
}

/// Write encoded strings as a dataset under `group` using `options`.
pub fn create_hdf5_string_dataset_with(
    group: &Group,
    name: &str,
    data: &EncodedStrings,
    options: &StringDatasetOptions,
) -> Result<Dataset> {
    let descriptor = TypeDescriptor::FixedAscii(data.width());
    match data {
        EncodedStrings::Null => {
            debug!("Creating empty string dataset {}", name);
            Ok(group
                .new_dataset_builder()
                .empty_as(&descriptor)
                .shape(Extents::Null)
                .create(name)?)
        }
        EncodedStrings::Fixed { data: bytes, .. } => {
            debug!(
                "Creating string dataset {} ({} x S{}, {:?})",
                name,
                data.len(),
                data.width(),
                options
            );
            let mut builder = group.new_dataset_builder();
            if let Some(entries) = options.chunk {
                builder = builder.chunk(entries.min(data.len()).max(1));
            }
            if options.shuffle {
                builder = builder.shuffle();
            }
            if let Some(level) = options.deflate {
                builder = builder.deflate(level);
            }
            let dataset = builder
                .empty_as(&descriptor)
                .shape(data.len())
                .create(name)?;
            let dtype = dataset.dtype()?;
            // SAFETY: `bytes` holds exactly len * width bytes of the dataset's own type.
            let status = unsafe {
                H5Dwrite(
                    dataset.id(),
                    dtype.id(),
                    H5S_ALL,
                    H5S_ALL,
                    H5P_DEFAULT,
                    bytes.as_ptr().cast(),
                )
            };
            check_status(status, "H5Dwrite", name)?;
            Ok(dataset)
        }
    }
}

/// Read a fixed-length string dataset back into text.
pub fn read_hdf5_string_dataset(dataset: &Dataset) -> Result<Vec<String>> {
    let name = dataset.name();
    // Null dataspaces report zero elements.
    let count = dataset.size();
    if count == 0 {
        return Ok(Vec::new());
    }

    let dtype = dataset.dtype()?;
    let width = fixed_width(&dtype.to_descriptor()?, &name)?;
    let mut buf = vec![0u8; count * width];
    // SAFETY: `buf` holds count * width bytes, the size of the dataset in its own type.
    let status = unsafe {
        H5Dread(
            dataset.id(),
            dtype.id(),
            H5S_ALL,
            H5S_ALL,
            H5P_DEFAULT,
            buf.as_mut_ptr().cast(),
        )
    };
    check_status(status, "H5Dread", &name)?;
    Ok(decode_strings(&EncodedStrings::from_raw(width, buf)?))
}

/// Set a string attribute, stored as variable-length UTF-8.
pub fn set_hdf5_attr(location: &Location, name: &str, value: &str) -> Result<Attribute> {
    let value: VarLenUnicode = value
        .parse()
        .map_err(|e| CellioError::InvalidInput(format!("attribute {}: {}", name, e)))?;
    let attr = location
        .new_attr::<VarLenUnicode>()
        .shape(())
        .create(name)?;
    attr.write_scalar(&value)?;
    Ok(attr)
}

/// Set a scalar attribute of any HDF5 type, e.g. a version number.
pub fn set_hdf5_scalar_attr<T: H5Type>(
    location: &Location,
    name: &str,
    value: &T,
) -> Result<Attribute> {
    let attr = location.new_attr::<T>().shape(()).create(name)?;
    attr.write_scalar(value)?;
    Ok(attr)
}

/// Set a 1-D array attribute.
pub fn set_hdf5_array_attr<T: H5Type>(
    location: &Location,
    name: &str,
    values: &[T],
) -> Result<Attribute> {
    let attr = location.new_attr::<T>().shape(values.len()).create(name)?;
    attr.write_raw(values)?;
    Ok(attr)
}

fn read_string_attr(attr: &Attribute, name: &str) -> Result<String> {
    let dtype = attr.dtype()?;
    match dtype.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => Ok(attr.read_scalar::<VarLenUnicode>()?.as_str().to_string()),
        TypeDescriptor::VarLenAscii => Ok(attr.read_scalar::<VarLenAscii>()?.as_str().to_string()),
        descriptor => {
            let width = fixed_width(&descriptor, name)?;
            let mut buf = vec![0u8; width];
            // SAFETY: a scalar fixed string attribute occupies exactly `width` bytes.
            let status = unsafe { H5Aread(attr.id(), dtype.id(), buf.as_mut_ptr().cast()) };
            check_status(status, "H5Aread", name)?;
            Ok(decode_fixed_entry(&buf))
        }
    }
}

/// Read the root `filetype` attribute. Older files lack it, giving `None`.
pub fn get_h5_filetype<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let file = File::open(path)?;
    if !file.attr_names()?.iter().any(|n| n == H5_FILETYPE_KEY) {
        return Ok(None);
    }
    let attr = file.attr(H5_FILETYPE_KEY)?;
    read_string_attr(&attr, H5_FILETYPE_KEY).map(Some)
}

/// Save a 1-D array at the root of a new HDF5 file.
pub fn save_array_h5<P: AsRef<Path>, T: H5Type>(path: P, name: &str, arr: &[T]) -> Result<()> {
    let file = File::create(path)?;
    file.new_dataset_builder().with_data(arr).create(name)?;
    Ok(())
}

/// Write several named 1-D arrays of one element type at the root of a new
/// HDF5 file, in iteration order. An existing file is truncated.
pub fn write_h5<P, I, K, V, T>(path: P, data: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<[T]>,
    T: H5Type,
{
    let path = path.as_ref();
    let file = File::create(path)?;
    for (name, arr) in data {
        let (name, arr) = (name.as_ref(), arr.as_ref());
        debug!("Writing {} ({} elements) to {}", name, arr.len(), path.display());
        file.new_dataset_builder().with_data(arr).create(name)?;
    }
    Ok(())
}

/// Load a 1-D array from the root of an HDF5 file.
pub fn load_array_h5<P: AsRef<Path>, T: H5Type>(path: P, name: &str) -> Result<Vec<T>> {
    let file = File::open(path)?;
    Ok(file.dataset(name)?.read_raw::<T>()?)
}
