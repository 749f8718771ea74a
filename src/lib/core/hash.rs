use crate::core::error::{CellioError, Result};
use once_cell::sync::Lazy;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default read size when hashing a file.
pub const DEFAULT_HASH_BLOCK_SIZE: usize = 1 << 20;
pub static DEFAULT_HASH_BLOCK_SIZE_STR: Lazy<String> =
    Lazy::new(|| DEFAULT_HASH_BLOCK_SIZE.to_string());

/// Compute the lowercase hex SHA-1 digest of a file, reading `block_size` bytes at a time.
pub fn compute_hash_of_file<P: AsRef<Path>>(path: P, block_size: usize) -> Result<String> {
    if block_size == 0 {
        return Err(CellioError::InvalidInput(
            "block_size must be greater than 0".to_string(),
        ));
    }

    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| CellioError::filesystem("open", path, e))?;
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; block_size];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_known_digests() {
        let empty = NamedTempFile::new().unwrap();
        assert_eq!(
            compute_hash_of_file(empty.path(), DEFAULT_HASH_BLOCK_SIZE).unwrap(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );

        let mut hello = NamedTempFile::new().unwrap();
        write!(hello, "hello").unwrap();
        assert_eq!(
            compute_hash_of_file(hello.path(), DEFAULT_HASH_BLOCK_SIZE).unwrap(),
            "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
    }

    #[test]
    fn test_block_size_does_not_change_digest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&b"ACGT".repeat(10_000)).unwrap();

        let whole = compute_hash_of_file(file.path(), DEFAULT_HASH_BLOCK_SIZE).unwrap();
        let tiny = compute_hash_of_file(file.path(), 7).unwrap();
        assert_eq!(whole, tiny);
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            compute_hash_of_file(file.path(), 0),
            Err(CellioError::InvalidInput(_))
        ));
    }
}
