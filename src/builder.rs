use crate::error::FlatfigError;
use crate::file;
use crate::ops::{self, ConfigResult};
use crate::store::ConfigStore;
use crate::types::{SearchPath, StoreAction};

/// Entry point for opening a flatfig store.
pub struct Flatfig;

impl Flatfig {
    pub fn builder() -> FlatfigBuilder {
        FlatfigBuilder::new()
    }
}

/// Builder for locating and opening a [`ConfigStore`].
///
/// ```ignore
/// let mut store = Flatfig::builder()
///     .app_name("puush")
///     .write_on_change(true)
///     .open()?;
/// let size: i32 = store.get("historysize", 5)?;
/// ```
#[derive(Debug, Clone)]
pub struct FlatfigBuilder {
    app_name: Option<String>,
    file_name: Option<String>,
    location: SearchPath,
    write_on_change: bool,
}

impl FlatfigBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            location: SearchPath::Platform,
            write_on_change: false,
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.cfg"`
    /// - the platform config directory for [`SearchPath::Platform`]
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the config file name (default: `"{app_name}.cfg"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Directory the file lives in (default: [`SearchPath::Platform`]).
    pub fn location(mut self, location: SearchPath) -> Self {
        self.location = location;
        self
    }

    /// Save on every mutation instead of waiting for an explicit save or
    /// drop (default: `false`).
    pub fn write_on_change(mut self, enabled: bool) -> Self {
        self.write_on_change = enabled;
        self
    }

    fn effective_file_name(&self) -> Result<String, FlatfigError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self
            .app_name
            .as_deref()
            .ok_or(FlatfigError::AppNameRequired)?;
        Ok(format!("{app}.cfg"))
    }

    /// The file the store will be bound to.
    pub fn store_path(&self) -> Result<std::path::PathBuf, FlatfigError> {
        let file_name = self.effective_file_name()?;
        file::resolve_store_path(&self.location, &file_name, self.app_name.as_deref())
    }

    /// Resolve the file and load it into a new store.
    pub fn open(self) -> Result<ConfigStore, FlatfigError> {
        let path = self.store_path()?;
        Ok(ConfigStore::open_with(path, self.write_on_change))
    }

    /// Handle a `StoreAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &StoreAction) -> Result<(), FlatfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `StoreAction` (list / get / set / unset) against the store
    /// this builder opens.
    pub fn handle(self, action: &StoreAction) -> Result<ConfigResult, FlatfigError> {
        let mut store = self.open()?;
        ops::handle(&mut store, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{FILE_NAME, write_sample};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn app_name_sets_file_name() {
        let builder = Flatfig::builder().app_name("puush");
        assert_eq!(builder.effective_file_name().unwrap(), "puush.cfg");
    }

    #[test]
    fn override_file_name() {
        let builder = Flatfig::builder().app_name("puush").file_name("custom.ini");
        assert_eq!(builder.effective_file_name().unwrap(), "custom.ini");
    }

    #[test]
    fn missing_app_name_errors() {
        let result = Flatfig::builder().open();
        assert!(matches!(result, Err(FlatfigError::AppNameRequired)));
    }

    #[test]
    fn explicit_file_name_and_path_need_no_app_name() {
        let dir = TempDir::new().unwrap();
        let path = Flatfig::builder()
            .file_name(FILE_NAME)
            .location(SearchPath::Path(dir.path().to_path_buf()))
            .store_path()
            .unwrap();
        assert_eq!(path, dir.path().join(FILE_NAME));
    }

    #[test]
    fn write_on_change_defaults_to_off() {
        let dir = TempDir::new().unwrap();
        let store = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(dir.path().to_path_buf()))
            .open()
            .unwrap();
        assert!(!store.write_on_change());
    }

    #[test]
    fn open_loads_existing_file() {
        let dir = TempDir::new().unwrap();
        write_sample(dir.path());

        let mut store = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(dir.path().to_path_buf()))
            .open()
            .unwrap();

        assert_eq!(store.get("historysize", 0).unwrap(), 5);
        assert_eq!(store.path(), Some(dir.path().join(FILE_NAME).as_path()));
    }

    #[test]
    fn open_with_write_on_change() {
        let dir = TempDir::new().unwrap();
        let mut store = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(dir.path().to_path_buf()))
            .write_on_change(true)
            .open()
            .unwrap();

        store.set("startup", true).unwrap();
        let content = fs::read_to_string(dir.path().join("puush.cfg")).unwrap();
        assert_eq!(content, "startup = 1\n");
    }

    #[test]
    fn open_creates_nested_location_on_save() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(nested.clone()))
            .open()
            .unwrap();

        store.set("type", 1).unwrap();
        store.save().unwrap();
        assert!(nested.join("puush.cfg").exists());
    }

    #[test]
    fn handle_set_then_get() {
        let dir = TempDir::new().unwrap();
        let builder = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(dir.path().to_path_buf()));

        builder
            .clone()
            .handle(&StoreAction::Set {
                key: "expiry".into(),
                value: "never".into(),
            })
            .unwrap();

        let result = builder
            .handle(&StoreAction::Get {
                key: "expiry".into(),
            })
            .unwrap();
        assert_eq!(
            result,
            ConfigResult::KeyValue {
                key: "expiry".into(),
                value: "never".into()
            }
        );
    }

    #[test]
    fn handle_list_empty_store() {
        let dir = TempDir::new().unwrap();
        let result = Flatfig::builder()
            .app_name("puush")
            .location(SearchPath::Path(dir.path().to_path_buf()))
            .handle(&StoreAction::List)
            .unwrap();
        assert_eq!(result, ConfigResult::Listing { entries: vec![] });
    }
}
