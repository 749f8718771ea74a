//! XML character references for keeping HDF5 string datasets 7-bit clean.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write;

static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);").expect("valid character reference pattern")
});

/// Replace every character outside 7-bit ASCII with `&#<codepoint>;`.
pub fn escape_non_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(escaped, "&#{};", c as u32);
        }
    }
    escaped
}

/// Only code points the encoder would have produced resolve. A reference to
/// an ASCII character is literal text and stays verbatim.
fn resolve(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse::<u32>().ok()?,
    };
    if code < 0x80 {
        return None;
    }
    char::from_u32(code)
}

/// Decode numeric references (`&#N;`, `&#xN;`) to characters outside 7-bit
/// ASCII. Named entities and references below 0x80 are left as written, so
/// ASCII text containing `&` survives an encode/decode round trip.
pub fn unescape(text: &str) -> String {
    if !text.contains("&#") {
        return text.to_string();
    }
    CHAR_REF
        .replace_all(text, |caps: &Captures| match resolve(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
