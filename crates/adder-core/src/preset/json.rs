//! JSON file editing for target projects

use crate::error::{PresetError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Deep merge `patch` into `base`
///
/// Objects merge key by key, arrays gain the patch items they do not already
/// contain, and anything else is replaced by the patch.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(patch)) => {
            for item in patch {
                if !base.contains(&item) {
                    base.push(item);
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Read a JSON object from `path`; a missing or blank file reads as `{}`
pub fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(PresetError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(PresetError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(PresetError::InvalidJson {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `map` as pretty-printed JSON with a trailing newline
pub fn write_object(path: &Path, map: Map<String, Value>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(&Value::Object(map)).map_err(|source| {
        PresetError::InvalidJson {
            path: path.to_path_buf(),
            source,
        }
    })?;
    content.push('\n');

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PresetError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| PresetError::io(path, e))
}

/// Read, modify and write back a JSON object file
pub fn update_file(path: &Path, edit: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
    let mut map = read_object(path)?;
    edit(&mut map);
    write_object(path, map)
}

/// Deep merge `patch` into the JSON object stored at `path`
pub fn merge_file(path: &Path, patch: &Value) -> Result<()> {
    update_file(path, |map| {
        let mut root = Value::Object(std::mem::take(map));
        deep_merge(&mut root, patch.clone());
        if let Value::Object(merged) = root {
            *map = merged;
        }
    })
}
