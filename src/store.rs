//! The config store: a two-tier key/value cache backed by one flat file.
//!
//! Every key holds an entry with two tiers:
//!
//! - **raw** — the text as it appears in the file (`None` for the null
//!   string).
//! - **parsed** — the typed [`Value`], filled in on first typed read.
//!
//! Writes through [`set`](ConfigStore::set) and
//! [`set_array`](ConfigStore::set_array) always replace both tiers together.
//! Writes that only know the text ([`load`](ConfigStore::load),
//! [`set_raw`](ConfigStore::set_raw)) drop the parsed tier so it is decoded
//! again on the next read; a stale typed value is never served.
//!
//! # Default materialization
//!
//! Reading a key that is not in the store writes the caller's default into
//! it. The file therefore accumulates every key the application has ever
//! asked for, with its default, and doubles as documentation of the
//! available settings. Because of this, reads take `&mut self`.
//!
//! # Persistence
//!
//! Mutations set the dirty flag. With write-through on (fixed when the store
//! is opened), every mutation saves the whole file before returning;
//! otherwise changes wait for [`save`](ConfigStore::save) or for the store to
//! be dropped. A failed write-through or drop save is logged and leaves the
//! store dirty so the next save retries.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::codec;
use crate::error::FlatfigError;
use crate::file::{self, LoadReport, LoadStatus};
use crate::value::{Array, Scalar, Setting, Value};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    raw: Option<String>,
    parsed: Option<Value>,
}

/// Typed, persistent, default-seeding key/value storage.
///
/// Not synchronized. Share it by reference from a single owner.
#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: IndexMap<String, Entry>,
    path: Option<PathBuf>,
    dirty: bool,
    write_on_change: bool,
}

impl ConfigStore {
    /// An empty store bound to no file. Saving it returns
    /// [`FlatfigError::NotInitialized`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `path` and load it, buffering changes until [`save`](Self::save).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with(path, false)
    }

    /// Bind to `path` and load it. With `write_on_change`, every mutation
    /// saves immediately.
    pub fn open_with(path: impl Into<PathBuf>, write_on_change: bool) -> Self {
        let mut store = Self::default();
        store.write_on_change = write_on_change;
        store.load(path);
        store
    }

    /// Read a scalar setting, materializing `default` if the key is absent.
    ///
    /// Fails with [`FlatfigError::MalformedValue`] when the stored text does
    /// not decode as `T`, and with [`FlatfigError::TypeMismatch`] when the
    /// key was already read or written as another type.
    pub fn get<T: Scalar>(&mut self, key: &str, default: T) -> Result<T, FlatfigError> {
        self.lookup(key, default)
    }

    /// Read a list setting, materializing `default` if the key is absent.
    pub fn get_array<T: Array>(&mut self, key: &str, default: T) -> Result<T, FlatfigError> {
        self.lookup(key, default)
    }

    /// Write a scalar setting.
    ///
    /// Fails with [`FlatfigError::InvalidEntry`] for a key or text the file
    /// cannot hold, and with [`FlatfigError::NotInitialized`] when
    /// write-through is on and the store has no file.
    pub fn set<T: Scalar>(&mut self, key: &str, value: T) -> Result<(), FlatfigError> {
        self.assign(key, value.into_value())
    }

    /// Write a list setting.
    pub fn set_array<T: Array>(&mut self, key: &str, value: T) -> Result<(), FlatfigError> {
        self.assign(key, value.into_value())
    }

    /// Write raw file text for `key`. The typed tier is dropped and will be
    /// decoded from `raw` on the next read.
    ///
    /// Fails with [`FlatfigError::InvalidEntry`] if the pair would not read
    /// back as written (a line break in `raw`, `=` in `key`, and so on).
    pub fn set_raw(&mut self, key: &str, raw: impl Into<String>) -> Result<(), FlatfigError> {
        let raw = raw.into();
        file::check_entry(key, Some(&raw))?;
        self.entries.insert(
            key.to_string(),
            Entry {
                raw: Some(raw),
                parsed: None,
            },
        );
        self.mark_dirty()
    }

    /// Remove `key`. Returns whether it was present; only a removal marks the
    /// store dirty.
    pub fn remove(&mut self, key: &str) -> Result<bool, FlatfigError> {
        if self.entries.shift_remove(key).is_none() {
            return Ok(false);
        }
        self.mark_dirty()?;
        Ok(true)
    }

    /// Clear the store, bind it to `path` and read the file.
    ///
    /// Never fails: see [`LoadReport`] for what happened. The store is clean
    /// afterwards.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> LoadReport {
        let path = path.into();
        self.entries.clear();
        self.dirty = false;

        let (doc, status) = file::read_store_file(&path);
        for bad in &doc.malformed {
            warn!(path = %path.display(), line = bad.line, "skipping malformed config line");
        }
        for (key, raw) in doc.entries {
            self.entries.insert(
                key,
                Entry {
                    raw: Some(raw),
                    parsed: None,
                },
            );
        }

        match &status {
            LoadStatus::Loaded => {
                debug!(path = %path.display(), entries = self.entries.len(), "loaded config")
            }
            LoadStatus::Absent => debug!(path = %path.display(), "no config file yet"),
            LoadStatus::Failed(e) => warn!(
                path = %path.display(),
                entries = self.entries.len(),
                error = %e,
                "config file could not be fully read"
            ),
        }

        self.path = Some(path);
        LoadReport {
            status,
            entries: self.entries.len(),
            malformed: doc.malformed,
        }
    }

    /// Write every entry to the bound file and clear the dirty flag.
    ///
    /// On an I/O error the store stays dirty.
    pub fn save(&mut self) -> Result<(), FlatfigError> {
        let path = self.path.as_deref().ok_or(FlatfigError::NotInitialized)?;
        let content = file::render_document(
            self.entries
                .iter()
                .map(|(k, e)| (k.as_str(), e.raw.as_deref())),
        );
        file::write_store_file(path, &content)?;
        debug!(path = %path.display(), entries = self.entries.len(), "saved config");
        self.dirty = false;
        Ok(())
    }

    /// Save only if something changed. Returns whether a save happened.
    pub fn save_if_dirty(&mut self) -> Result<bool, FlatfigError> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn write_on_change(&self) -> bool {
        self.write_on_change
    }

    /// The bound file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw text for `key`. `None` if the key is absent or holds the null string.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.raw.as_deref())
    }

    /// `(key, raw)` pairs in insertion order, as they would be saved.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.raw.as_deref()))
    }

    fn lookup<T: Setting>(&mut self, key: &str, default: T) -> Result<T, FlatfigError> {
        if let Some(entry) = self.entries.get_mut(key) {
            if let Some(parsed) = &entry.parsed {
                return T::from_value(parsed).ok_or_else(|| FlatfigError::TypeMismatch {
                    key: key.into(),
                    cached: parsed.kind(),
                    requested: T::KIND,
                });
            }
            if let Some(raw) = &entry.raw {
                let value = T::decode(key, raw)?;
                entry.parsed = Some(value.clone().into_value());
                return Ok(value);
            }
        }

        debug!(key, "materializing default");
        self.assign(key, default.clone().into_value())?;
        Ok(default)
    }

    fn assign(&mut self, key: &str, value: Value) -> Result<(), FlatfigError> {
        let raw = codec::encode(&value);
        file::check_entry(key, raw.as_deref())?;
        self.entries.insert(
            key.to_string(),
            Entry {
                raw,
                parsed: Some(value),
            },
        );
        self.mark_dirty()
    }

    fn mark_dirty(&mut self) -> Result<(), FlatfigError> {
        self.dirty = true;
        if !self.write_on_change {
            return Ok(());
        }
        match self.save() {
            Err(FlatfigError::IoError { path, source }) => {
                warn!(path = %path.display(), error = %source, "write-through save failed");
                Ok(())
            }
            other => other,
        }
    }
}

impl Drop for ConfigStore {
    fn drop(&mut self) {
        if !self.dirty {
            return;
        }
        if self.path.is_none() {
            debug!(entries = self.entries.len(), "dropping unbound config store with changes");
            return;
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "final config save failed");
        }
    }
}
