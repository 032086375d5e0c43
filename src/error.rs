use std::path::PathBuf;
use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FlatfigError {
    #[error("Malformed value for '{key}': expected {expected}, found '{raw}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flatfig::malformed_value),
            help("fix or delete the line in the config file; the default is used once it is gone")
        )
    )]
    MalformedValue {
        key: String,
        raw: String,
        expected: ValueKind,
    },

    #[error("Key '{key}' holds a {cached} value but was requested as {requested}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flatfig::type_mismatch)))]
    TypeMismatch {
        key: String,
        cached: ValueKind,
        requested: ValueKind,
    },

    #[error("Invalid entry '{key}': {reason}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flatfig::invalid_entry),
            help("keys cannot contain '=' or surrounding spaces; values cannot span lines")
        )
    )]
    InvalidEntry { key: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flatfig::io)))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Store is not bound to a file — open it with a path before saving")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(flatfig::not_initialized), help("use ConfigStore::open or Flatfig::builder"))
    )]
    NotInitialized,

    #[error("Key not found: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flatfig::key_not_found)))]
    KeyNotFound(String),

    #[error("Could not resolve a location for the config file")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flatfig::no_store_path)))]
    NoStorePath,

    #[error("App name is required — call .app_name() on the builder")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flatfig::app_name_required)))]
    AppNameRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_value_formats_correctly() {
        let err = FlatfigError::MalformedValue {
            key: "historysize".into(),
            raw: "five".into(),
            expected: ValueKind::Int32,
        };
        let msg = err.to_string();
        assert!(msg.contains("historysize"));
        assert!(msg.contains("five"));
        assert!(msg.contains("32-bit integer"));
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let err = FlatfigError::TypeMismatch {
            key: "usage".into(),
            cached: ValueKind::Int64,
            requested: ValueKind::Text,
        };
        let msg = err.to_string();
        assert!(msg.contains("64-bit integer"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn invalid_entry_formats() {
        let err = FlatfigError::InvalidEntry {
            key: "a=b".into(),
            reason: "key contains '='".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a=b"));
        assert!(msg.contains("'='"));
    }

    #[test]
    fn key_not_found_formats() {
        let err = FlatfigError::KeyNotFound("servers".into());
        assert!(err.to_string().contains("servers"));
    }

    #[test]
    fn app_name_required_formats() {
        let err = FlatfigError::AppNameRequired;
        assert!(err.to_string().contains("app_name"));
    }
}
