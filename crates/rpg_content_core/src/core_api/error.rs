use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::rules::REPORT_DISPLAY_CAP;
use crate::validation::ValidationReport;

use super::types::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentErrorCode {
    MissingFile,
    Io,
    MalformedDocument,
    SchemaViolation,
    NotFound,
    DuplicateId,
    InvalidPathSyntax,
    PathAccessFailure,
    InvalidInputValue,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Missing content pack: {basename}.json5 or {basename}.json in {}", .dir.display())]
    MissingPack { dir: PathBuf, basename: String },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {detail}", .path.display())]
    MalformedDocument { path: PathBuf, detail: String },

    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{}", capped_summary(.0))]
    Validation(ValidationReport),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid path '{path}': {detail}")]
    InvalidPath { path: String, detail: String },

    #[error("{detail}")]
    PathAccess { path: String, detail: String },

    #[error("Invalid value: {detail}")]
    InvalidValue { raw: String, detail: String },

    #[error("Invalid --param '{raw}'. {detail}")]
    InvalidParam { raw: String, detail: String },
}

impl ContentError {
    pub fn code(&self) -> ContentErrorCode {
        match self {
            Self::MissingPack { .. } => ContentErrorCode::MissingFile,
            Self::Io { .. } => ContentErrorCode::Io,
            Self::MalformedDocument { .. } | Self::Encode(_) => {
                ContentErrorCode::MalformedDocument
            }
            Self::Validation(_) => ContentErrorCode::SchemaViolation,
            Self::NotFound { .. } => ContentErrorCode::NotFound,
            Self::DuplicateId { .. } => ContentErrorCode::DuplicateId,
            Self::InvalidPath { .. } => ContentErrorCode::InvalidPathSyntax,
            Self::PathAccess { .. } => ContentErrorCode::PathAccessFailure,
            Self::InvalidValue { .. } | Self::InvalidParam { .. } => {
                ContentErrorCode::InvalidInputValue
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_path(path: &str, detail: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn path_access(path: &str, detail: impl Into<String>) -> Self {
        Self::PathAccess {
            path: path.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_value(raw: &str, detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            raw: raw.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_param(raw: &str, detail: impl Into<String>) -> Self {
        Self::InvalidParam {
            raw: raw.to_string(),
            detail: detail.into(),
        }
    }

    /// Issues carried by a failed post-mutation validation, if any.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}

fn capped_summary(report: &ValidationReport) -> String {
    report.summary(Some(REPORT_DISPLAY_CAP))
}
