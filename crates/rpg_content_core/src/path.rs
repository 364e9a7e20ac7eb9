//! Dotted/bracketed path expressions over a JSON document tree.
//!
//! `steps[0].itemId` addresses the `itemId` key of the first element of the
//! `steps` array. `set_by_path` and `delete_by_path` create missing
//! intermediate objects/arrays while descending, but never grow an array:
//! every index must already be in bounds.

use std::fmt;

use log::debug;
use serde_json::{Map, Value};

use crate::core_api::ContentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

pub fn parse_path(path: &str) -> Result<Vec<PathToken>, ContentError> {
    if path.trim().is_empty() {
        return Err(ContentError::invalid_path(path, "Path cannot be empty"));
    }

    let mut tokens = Vec::new();
    let mut key = String::new();
    let mut rest = path;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '.' => {
                flush_key(&mut key, &mut tokens);
                rest = &rest[1..];
            }
            '[' => {
                flush_key(&mut key, &mut tokens);
                let Some(closing) = rest.find(']') else {
                    return Err(ContentError::invalid_path(path, "Missing closing ']'"));
                };
                let raw_index = &rest[1..closing];
                if raw_index.is_empty() || !raw_index.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ContentError::invalid_path(
                        path,
                        format!("Index '{raw_index}' is not numeric"),
                    ));
                }
                let index = raw_index.parse::<usize>().map_err(|_| {
                    ContentError::invalid_path(path, format!("Index '{raw_index}' is too large"))
                })?;
                tokens.push(PathToken::Index(index));
                rest = &rest[closing + 1..];
            }
            other => {
                key.push(other);
                rest = &rest[other.len_utf8()..];
            }
        }
    }
    flush_key(&mut key, &mut tokens);

    if tokens.is_empty() {
        return Err(ContentError::invalid_path(path, "Path cannot be empty"));
    }
    Ok(tokens)
}

fn flush_key(key: &mut String, tokens: &mut Vec<PathToken>) {
    if !key.is_empty() {
        tokens.push(PathToken::Key(std::mem::take(key)));
    }
}

pub fn get_by_path<'a>(target: &'a Value, path: &str) -> Result<&'a Value, ContentError> {
    let tokens = parse_path(path)?;
    let mut cursor = target;
    for token in &tokens {
        cursor = match (token, cursor) {
            (PathToken::Key(key), Value::Object(map)) => map.get(key).ok_or_else(|| {
                ContentError::path_access(path, format!("Key '{key}' does not exist"))
            })?,
            (PathToken::Key(key), _) => {
                return Err(ContentError::path_access(
                    path,
                    format!("Cannot access key '{key}' on non-object"),
                ));
            }
            (PathToken::Index(index), Value::Array(items)) => items
                .get(*index)
                .ok_or_else(|| out_of_bounds(path, *index, items.len()))?,
            (PathToken::Index(index), _) => {
                return Err(ContentError::path_access(
                    path,
                    format!("Cannot access index [{index}] on non-array"),
                ));
            }
        };
    }
    Ok(cursor)
}

pub fn set_by_path(target: &mut Value, path: &str, value: Value) -> Result<(), ContentError> {
    let tokens = parse_path(path)?;
    let (leaf, parents) = split_leaf(path, &tokens)?;
    let cursor = descend(target, path, parents, leaf)?;
    debug!("set {path}");

    match (leaf, cursor) {
        (PathToken::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (PathToken::Key(key), _) => Err(ContentError::path_access(
            path,
            format!("Cannot set key '{key}' on non-object"),
        )),
        (PathToken::Index(index), Value::Array(items)) => {
            let len = items.len();
            let slot = items
                .get_mut(*index)
                .ok_or_else(|| out_of_bounds(path, *index, len))?;
            *slot = value;
            Ok(())
        }
        (PathToken::Index(index), _) => Err(ContentError::path_access(
            path,
            format!("Cannot set index [{index}] on non-array"),
        )),
    }
}

/// Removes the addressed key or array element and returns it.
pub fn delete_by_path(target: &mut Value, path: &str) -> Result<Value, ContentError> {
    let tokens = parse_path(path)?;
    let (leaf, parents) = split_leaf(path, &tokens)?;
    let cursor = descend(target, path, parents, leaf)?;
    debug!("delete {path}");

    match (leaf, cursor) {
        (PathToken::Key(key), Value::Object(map)) => map.shift_remove(key).ok_or_else(|| {
            ContentError::path_access(path, format!("Key '{key}' does not exist"))
        }),
        (PathToken::Key(key), _) => Err(ContentError::path_access(
            path,
            format!("Cannot delete key '{key}' on non-object"),
        )),
        (PathToken::Index(index), Value::Array(items)) => {
            if *index >= items.len() {
                return Err(out_of_bounds(path, *index, items.len()));
            }
            Ok(items.remove(*index))
        }
        (PathToken::Index(index), _) => Err(ContentError::path_access(
            path,
            format!("Cannot delete index [{index}] on non-array"),
        )),
    }
}

fn split_leaf<'t>(
    path: &str,
    tokens: &'t [PathToken],
) -> Result<(&'t PathToken, &'t [PathToken]), ContentError> {
    tokens
        .split_last()
        .ok_or_else(|| ContentError::invalid_path(path, "Path cannot be empty"))
}

fn descend<'a>(
    target: &'a mut Value,
    path: &str,
    parents: &[PathToken],
    leaf: &PathToken,
) -> Result<&'a mut Value, ContentError> {
    let mut cursor = target;
    for (position, token) in parents.iter().enumerate() {
        let next = parents.get(position + 1).unwrap_or(leaf);
        cursor = ensure_container(cursor, path, token, next)?;
    }
    Ok(cursor)
}

fn ensure_container<'a>(
    target: &'a mut Value,
    path: &str,
    token: &PathToken,
    next: &PathToken,
) -> Result<&'a mut Value, ContentError> {
    match token {
        PathToken::Key(key) => {
            let Value::Object(map) = target else {
                return Err(ContentError::path_access(
                    path,
                    format!("Cannot access key '{key}' on non-object"),
                ));
            };
            let slot = map.entry(key.clone()).or_insert(Value::Null);
            if slot.is_null() {
                *slot = match next {
                    PathToken::Index(_) => Value::Array(Vec::new()),
                    PathToken::Key(_) => Value::Object(Map::new()),
                };
            }
            Ok(slot)
        }
        PathToken::Index(index) => {
            let Value::Array(items) = target else {
                return Err(ContentError::path_access(
                    path,
                    format!("Cannot access index [{index}] on non-array"),
                ));
            };
            let len = items.len();
            items
                .get_mut(*index)
                .ok_or_else(|| out_of_bounds(path, *index, len))
        }
    }
}

fn out_of_bounds(path: &str, index: usize, len: usize) -> ContentError {
    ContentError::path_access(path, format!("Index [{index}] out of bounds (size={len})"))
}
