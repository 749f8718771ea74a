//! Shallow merge of top-level JSON objects.
//!
//! Keys are unioned across inputs. A repeated key is accepted when the values
//! are equal (numbers by value), or when both values are objects, in which case the later object
//! is folded into the earlier one one level deep (later entries win). Any
//! other repetition is a [`CellioError::MergeConflict`]; arrays are never
//! merged.

use crate::core::error::{CellioError, Result};
use log::{debug, info};
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Name of a JSON value's type, as used in conflict messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Structural equality where numbers compare by value, so `1` equals `1.0`.
/// Object key order is ignored.
pub fn json_values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| json_values_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, l)| y.get(key).map_or(false, |r| json_values_equal(l, r)))
        }
        _ => a == b,
    }
}

fn merge_into(merged: &mut Map<String, Value>, object: Map<String, Value>) -> Result<()> {
    for (key, value) in object {
        match merged.get_mut(&key) {
            None => {
                merged.insert(key, value);
            }
            Some(existing) if json_values_equal(existing, &value) => {}
            Some(Value::Object(existing)) if value.is_object() => {
                if let Value::Object(incoming) = value {
                    debug!("Merging {} nested keys under {}", incoming.len(), key);
                    existing.extend(incoming);
                }
            }
            Some(existing) => {
                return Err(CellioError::MergeConflict {
                    value_type: json_type_name(&value).to_string(),
                    value: value.to_string(),
                    prior: existing.to_string(),
                    key,
                });
            }
        }
    }
    Ok(())
}

/// Merge already-parsed top-level objects in order.
pub fn merge_json_values<I>(objects: I) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut merged = Map::new();
    for object in objects {
        merge_into(&mut merged, object)?;
    }
    Ok(merged)
}

fn load_object(path: &Path) -> Result<Map<String, Value>> {
    let file = File::open(path).map_err(|e| CellioError::filesystem("open", path, e))?;
    match serde_json::from_reader(BufReader::new(file))? {
        Value::Object(object) => Ok(object),
        other => Err(CellioError::InvalidInput(format!(
            "{} must contain a top-level JSON object, found {}",
            path.display(),
            json_type_name(&other)
        ))),
    }
}

/// Merge a list of JSON files, each holding one top-level object.
pub fn merge_jsons_single_level<P: AsRef<Path>>(paths: &[P]) -> Result<Map<String, Value>> {
    let mut merged = Map::new();
    for path in paths {
        let path = path.as_ref();
        debug!("Merging {}", path.display());
        merge_into(&mut merged, load_object(path)?)?;
    }
    info!("Merged {} JSON files into {} keys", paths.len(), merged.len());
    Ok(merged)
}

/// Pretty-print a JSON object to `path`.
pub fn write_json<P: AsRef<Path>>(path: P, object: &Map<String, Value>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CellioError::filesystem("create", path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, object)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
