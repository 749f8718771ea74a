//! Fixed-width ASCII encoding for string datasets.
//!
//! Strings are stored as fixed-length 7-bit ASCII, with every character outside
//! that range written as an XML numeric character reference (the convention
//! used by the Loom file format). Both an absent sequence and an empty sequence
//! encode to [`EncodedStrings::Null`]; absent elements and empty strings both
//! encode to an empty entry, so neither distinction survives a round trip.

use crate::core::error::{CellioError, Result};
use crate::h5::xml::{escape_non_ascii, unescape};
use crate::json::json_type_name;
use serde_json::Value;

/// Fixed-width strings ready to be written to (or just read from) a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedStrings {
    /// No elements. Stored as a null-shaped dataset of width 1.
    Null,
    /// `data.len() / width` entries, each NUL padded to `width` bytes.
    Fixed { width: usize, data: Vec<u8> },
}

impl EncodedStrings {
    /// Byte width of each entry. Never zero.
    pub fn width(&self) -> usize {
        match self {
            EncodedStrings::Null => 1,
            EncodedStrings::Fixed { width, .. } => *width,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EncodedStrings::Null => 0,
            EncodedStrings::Fixed { width, data } => data.len() / width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EncodedStrings::Null => &[],
            EncodedStrings::Fixed { data, .. } => data,
        }
    }

    /// Iterate over the padded entries.
    pub fn entries(&self) -> impl Iterator<Item = &[u8]> {
        self.as_bytes().chunks_exact(self.width())
    }

    /// Build from raw dataset contents. An empty buffer becomes [`EncodedStrings::Null`].
    pub fn from_raw(width: usize, data: Vec<u8>) -> Result<EncodedStrings> {
        if width == 0 {
            return Err(CellioError::InvalidInput(
                "fixed string width must be at least 1".to_string(),
            ));
        }
        if data.len() % width != 0 {
            return Err(CellioError::InvalidInput(format!(
                "buffer of {} bytes is not a multiple of the string width {}",
                data.len(),
                width
            )));
        }
        if data.is_empty() {
            return Ok(EncodedStrings::Null);
        }
        Ok(EncodedStrings::Fixed { width, data })
    }
}

fn pack(encoded: Vec<String>) -> EncodedStrings {
    if encoded.is_empty() {
        return EncodedStrings::Null;
    }
    // Zero-width fixed strings cannot be stored.
    let width = encoded.iter().map(String::len).max().unwrap_or(0).max(1);
    let mut data = vec![0u8; width * encoded.len()];
    for (slot, entry) in data.chunks_exact_mut(width).zip(&encoded) {
        slot[..entry.len()].copy_from_slice(entry.as_bytes());
    }
    EncodedStrings::Fixed { width, data }
}

/// Encode optional strings. `None` elements become empty entries.
pub fn encode_strings<S: AsRef<str>>(values: Option<&[Option<S>]>) -> EncodedStrings {
    let values = values.unwrap_or(&[]);
    pack(
        values
            .iter()
            .map(|v| v.as_ref().map_or_else(String::new, |s| escape_non_ascii(s.as_ref())))
            .collect(),
    )
}

/// Encode dynamically typed values. Every element must be a string or null.
///
/// Validation happens before any encoding, so a failure leaves nothing half built.
pub fn encode_json_strings(values: Option<&[Value]>) -> Result<EncodedStrings> {
    let values = values.unwrap_or(&[]);
    let strings = values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.as_str())),
            other => Err(CellioError::InvalidInputType {
                index,
                found: json_type_name(other).to_string(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(encode_strings(Some(strings.as_slice())))
}

/// Decode one stored entry: trailing NUL padding is dropped, non-ASCII bytes are
/// discarded, and character references are resolved.
pub fn decode_fixed_entry(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let ascii: String = raw[..end]
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();
    unescape(&ascii)
}

/// Decode every entry. [`EncodedStrings::Null`] decodes to an empty list.
pub fn decode_strings(encoded: &EncodedStrings) -> Vec<String> {
    encoded.entries().map(decode_fixed_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roundtrip(values: &[Option<&str>]) -> Vec<String> {
        decode_strings(&encode_strings(Some(values)))
    }

    #[test]
    fn test_ascii_roundtrip() {
        let values = ["AAACCTGAGAAGGCCT-1", "", "x", "gene name with spaces"];
        let wrapped: Vec<Option<&str>> = values.iter().map(|v| Some(*v)).collect();
        assert_eq!(roundtrip(&wrapped), values);
    }

    #[test]
    fn test_ascii_with_reference_text_roundtrip() {
        let values = ["AT&amp;T", "x&#65;y", "a&lt;b", "R&D", "&#x7e;"];
        let wrapped: Vec<Option<&str>> = values.iter().map(|v| Some(*v)).collect();
        assert_eq!(roundtrip(&wrapped), values);
    }

    #[test]
    fn test_absent_and_empty_collapse() {
        assert_eq!(roundtrip(&[None]), vec![""]);
        assert_eq!(roundtrip(&[Some("")]), vec![""]);
        assert_eq!(
            encode_strings(Some(&[None::<&str>][..])),
            encode_strings(Some(&[Some("")][..]))
        );
    }

    #[test]
    fn test_all_empty_uses_width_one() {
        let encoded = encode_strings(Some(&[Some(""), None][..]));
        assert_eq!(encoded.width(), 1);
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded.as_bytes(), &[0, 0]);
    }

    #[test]
    fn test_width_is_longest_encoded_entry() {
        let encoded = encode_strings(Some(&[Some("ab"), Some("é"), None][..]));
        // "é" encodes to "&#233;"
        assert_eq!(encoded.width(), 6);
        let entries: Vec<&[u8]> = encoded.entries().collect();
        assert_eq!(entries[0], b"ab\0\0\0\0");
        assert_eq!(entries[1], b"&#233;");
        assert_eq!(entries[2], b"\0\0\0\0\0\0");
    }

    #[test]
    fn test_non_ascii_escaped_and_restored() {
        let encoded = encode_strings(Some(&[Some("Naïve"), Some("Δ-cell")][..]));
        assert!(encoded.as_bytes().is_ascii());
        assert!(encoded.entries().next().unwrap().starts_with(b"Na&#239;ve"));
        assert_eq!(decode_strings(&encoded), vec!["Naïve", "Δ-cell"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_strings::<&str>(None), EncodedStrings::Null);
        assert_eq!(encode_strings::<&str>(Some(&[][..])), EncodedStrings::Null);
        assert_eq!(EncodedStrings::Null.width(), 1);
        assert!(decode_strings(&EncodedStrings::Null).is_empty());
    }

    #[test]
    fn test_decode_drops_non_ascii_bytes() {
        assert_eq!(decode_fixed_entry(b"ab\xffc\0\0"), "abc");
        assert_eq!(decode_fixed_entry(b"\0\0"), "");
    }

    #[test]
    fn test_json_strings() {
        let values = vec![json!("a"), json!(null), json!("ü")];
        let encoded = encode_json_strings(Some(values.as_slice())).unwrap();
        assert_eq!(decode_strings(&encoded), vec!["a", "", "ü"]);

        assert_eq!(encode_json_strings(None).unwrap(), EncodedStrings::Null);
    }

    #[test]
    fn test_json_strings_invalid_type() {
        let values = vec![json!("a"), json!(42)];
        match encode_json_strings(Some(values.as_slice())).unwrap_err() {
            CellioError::InvalidInputType { index, found } => {
                assert_eq!(index, 1);
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_raw() {
        let encoded = EncodedStrings::from_raw(3, b"ab\0cd\0".to_vec()).unwrap();
        assert_eq!(decode_strings(&encoded), vec!["ab", "cd"]);
        assert_eq!(EncodedStrings::from_raw(2, Vec::new()).unwrap(), EncodedStrings::Null);
        assert!(EncodedStrings::from_raw(0, Vec::new()).is_err());
        assert!(EncodedStrings::from_raw(4, b"abc".to_vec()).is_err());
    }
}
