//! A typed, write-back preference store for desktop applications, backed by
//! a flat `key = value` text file.
//!
//! ```ignore
//! let mut store = Flatfig::builder()
//!     .app_name("puush")
//!     .open()?;
//!
//! let history_size: i32 = store.get("historysize", 5)?;
//! let servers: Vec<String> = store.get_array("servers", vec![default_server()])?;
//! store.set("lastupdate", now.to_string())?;
//! store.save()?;
//! ```
//!
//! That opens `~/.config/puush/puush.cfg` (or the platform equivalent),
//! reads two settings and writes one back.
//!
//! # The file
//!
//! ```text
//! username = someone@example.com
//! historysize = 5
//! openbrowser = 0
//! servers = https%3A%2F%2Fpuush.me%2F,https%3A%2F%2Fmirror.example%2F
//! ```
//!
//! One entry per line, split on the first `=`, key and value trimmed.
//! Booleans are `1`/`0`, integers are decimal, strings are written as-is,
//! and lists are comma-joined (string fields percent-encoded). See the
//! [`codec`] and `file` modules for the exact rules.
//!
//! # Reading is seeding
//!
//! Every read names a default. If the key is not in the file yet, the default
//! is stored and saved with the next write, so after one run the file lists
//! every setting the application knows about. Reads therefore take
//! `&mut self` and can mark the store dirty.
//!
//! # Two tiers
//!
//! The store keeps the raw text of each key and, once it has been read, the
//! typed [`Value`]. The typed value answers later reads without re-parsing.
//! A key must be read with the same type every time; reading it as another
//! type is a [`FlatfigError::TypeMismatch`].
//!
//! # Saving
//!
//! Writes set a dirty flag. Call [`ConfigStore::save`] when convenient, open
//! the store with [`write_on_change`](FlatfigBuilder::write_on_change) to save
//! on every write, or rely on the final save when the store is dropped.
//!
//! # Failure handling
//!
//! A damaged or unreadable file never stops the application: loading keeps
//! what it could read and reports the rest in a [`LoadReport`], and failed
//! background saves are logged through `tracing` and retried on the next save.
//! Explicit saves and typed reads return [`FlatfigError`] so callers can
//! decide.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`ConfigArgs`] gives an
//! application `config list|get|set|unset` subcommands over its file.

pub mod codec;
pub mod error;
pub mod ops;
pub mod types;
pub mod value;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod store;

#[cfg(test)]
mod fixtures;

pub use builder::{Flatfig, FlatfigBuilder};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::FlatfigError;
pub use file::{LoadReport, LoadStatus, MalformedLine};
pub use ops::ConfigResult;
pub use store::ConfigStore;
pub use types::{SearchPath, StoreAction};
pub use value::{Array, Scalar, Setting, Value, ValueKind};
