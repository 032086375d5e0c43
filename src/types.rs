//! Public vocabulary types shared by the builder, the ops layer and the CLI
//! adapter.
//!
//! # Where the file lives
//!
//! A store is bound to exactly one file. [`SearchPath`] names the directory it
//! lives in; the builder joins it with the file name
//! (`{app_name}.cfg` unless overridden):
//!
//! ```text
//! Platform        ~/.config/{app_name}/           (XDG on Linux)
//!                 ~/Library/Application Support/{app_name}/   (macOS)
//! Home(".puush")  ~/.puush/
//! Cwd             ./
//! Path(p)         p/
//! ```
//!
//! # Actions
//!
//! [`StoreAction`] is the framework-independent form of the `config
//! list|get|set|unset` commands. The clap adapter produces one; so can any
//! other front end.

use std::path::PathBuf;

/// Where the config file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".puush")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A store operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
}
