//! Store operations behind `config list|get|set|unset`, and the
//! `ConfigResult` enum that callers use to display results.
//!
//! These work on raw text. `get` and `unset` never materialize defaults, and
//! `set` stores the text as given; the next typed read decodes it. All
//! mutating actions save immediately so a one-shot command leaves the file
//! up to date.

use std::fmt;

use crate::error::FlatfigError;
use crate::store::ConfigStore;
use crate::types::StoreAction;

/// Result of a store operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's raw value.
    KeyValue { key: String, value: String },
    /// Confirmation that a value was persisted.
    ValueSet { key: String, value: String },
    /// Confirmation that a value was removed.
    ValueUnset { key: String },
    /// Every entry, in file order.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ConfigResult::ValueUnset { key } => write!(f, "Unset {key}"),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Apply `action` to `store`.
pub fn handle(store: &mut ConfigStore, action: &StoreAction) -> Result<ConfigResult, FlatfigError> {
    match action {
        StoreAction::List => Ok(list_values(store)),
        StoreAction::Get { key } => get_value(store, key),
        StoreAction::Set { key, value } => {
            store.set_raw(key, value.as_str())?;
            store.save_if_dirty()?;
            Ok(ConfigResult::ValueSet {
                key: key.clone(),
                value: value.clone(),
            })
        }
        StoreAction::Unset { key } => {
            if !store.remove(key)? {
                return Err(FlatfigError::KeyNotFound(key.clone()));
            }
            store.save_if_dirty()?;
            Ok(ConfigResult::ValueUnset { key: key.clone() })
        }
    }
}

pub fn list_values(store: &ConfigStore) -> ConfigResult {
    let entries = store
        .entries()
        .map(|(k, v)| (k.to_string(), v.unwrap_or_default().to_string()))
        .collect();
    ConfigResult::Listing { entries }
}

pub fn get_value(store: &ConfigStore, key: &str) -> Result<ConfigResult, FlatfigError> {
    if !store.contains_key(key) {
        return Err(FlatfigError::KeyNotFound(key.into()));
    }
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: store.raw(key).unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{FILE_NAME, write_sample};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn list_returns_file_order() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(write_sample(dir.path()));
        let ConfigResult::Listing { entries } = list_values(&store) else {
            panic!("expected Listing");
        };
        assert_eq!(entries[0], ("username".into(), "someone@example.com".into()));
        assert_eq!(entries.last().unwrap().0, "hotkeys");
    }

    #[test]
    fn get_existing_key() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::open(write_sample(dir.path()));
        let result = handle(
            &mut store,
            &StoreAction::Get {
                key: "historysize".into(),
            },
        )
        .unwrap();
        assert_eq!(result.to_string(), "historysize = 5");
    }

    #[test]
    fn get_missing_key_does_not_materialize() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::open(write_sample(dir.path()));
        let result = handle(&mut store, &StoreAction::Get { key: "nope".into() });
        assert!(matches!(result, Err(FlatfigError::KeyNotFound(_))));
        assert!(!store.contains_key("nope"));
        assert!(!store.is_dirty());
    }

    #[test]
    fn set_persists_raw_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(FILE_NAME);
        let mut store = ConfigStore::open(&path);

        let result = handle(
            &mut store,
            &StoreAction::Set {
                key: "historysize".into(),
                value: "8".into(),
            },
        )
        .unwrap();
        assert_eq!(result.to_string(), "Set historysize = 8");
        assert!(!store.is_dirty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "historysize = 8\n");
        assert_eq!(store.get("historysize", 5).unwrap(), 8);
    }

    #[test]
    fn set_refuses_multi_line_value() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(dir.path());
        let mut store = ConfigStore::open(&path);

        let result = handle(
            &mut store,
            &StoreAction::Set {
                key: "k".into(),
                value: "1\nhistorysize = 999".into(),
            },
        );
        assert!(matches!(result, Err(FlatfigError::InvalidEntry { .. })));
        assert!(!store.is_dirty());
        assert!(!fs::read_to_string(&path).unwrap().contains("999"));
    }

    #[test]
    fn unset_removes_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(dir.path());
        let mut store = ConfigStore::open(&path);

        let result = handle(&mut store, &StoreAction::Unset { key: "key".into() }).unwrap();
        assert_eq!(result, ConfigResult::ValueUnset { key: "key".into() });
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("key = "));
        assert!(content.contains("username = "));
    }

    #[test]
    fn unset_missing_key_errors() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::open(dir.path().join(FILE_NAME));
        let result = handle(&mut store, &StoreAction::Unset { key: "nope".into() });
        assert!(matches!(result, Err(FlatfigError::KeyNotFound(_))));
    }

    #[test]
    fn listing_display_joins_lines() {
        let result = ConfigResult::Listing {
            entries: vec![("a".into(), "1".into()), ("b".into(), "".into())],
        };
        assert_eq!(result.to_string(), "a = 1\nb = ");
    }
}
