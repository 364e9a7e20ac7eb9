use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::core_api::ContentError;
use crate::json5_loose;

/// Reads a `.json` or `.json5` pack file. The root must be an object.
pub fn parse_content_file(path: &Path) -> Result<Value, ContentError> {
    let raw = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
    let document = parse_content_str(path, &raw)?;
    if !document.is_object() {
        return Err(ContentError::malformed(path, "root must be an object"));
    }
    debug!("parsed {}", path.display());
    Ok(document)
}

fn parse_content_str(path: &Path, raw: &str) -> Result<Value, ContentError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            serde_json::from_str(raw).map_err(|e| ContentError::malformed(path, e.to_string()))
        }
        Some("json5") => match json5::from_str::<Value>(raw) {
            Ok(document) => Ok(document),
            Err(err) => {
                warn!(
                    "{} rejected by the JSON5 parser ({err}), using the loose reader",
                    path.display()
                );
                serde_json::from_str(&json5_loose::normalize(raw))
                    .map_err(|e| ContentError::malformed(path, e.to_string()))
            }
        },
        other => Err(ContentError::malformed(
            path,
            format!("Unsupported file extension: .{}", other.unwrap_or_default()),
        )),
    }
}

/// Pretty JSON with a trailing newline; non-ASCII text is written verbatim.
pub fn to_pretty_json(document: &Value) -> Result<String, ContentError> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

/// Writes `<file>.tmp` next to the target, then renames it into place.
pub fn write_content_file(path: &Path, document: &Value) -> Result<(), ContentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ContentError::io(parent, e))?;
    }
    let text = to_pretty_json(document)?;
    let temp = temp_path(path);
    fs::write(&temp, text).map_err(|e| ContentError::io(&temp, e))?;
    fs::rename(&temp, path).map_err(|e| ContentError::io(path, e))?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
