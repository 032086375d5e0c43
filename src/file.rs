//! The flat `key = value` file: grammar, reading, writing and location.
//!
//! # Grammar
//!
//! One entry per line:
//!
//! ```text
//! <key> = <value>
//! ```
//!
//! - The line is split on its **first** `=` only, so `url = a=b` has key
//!   `url` and value `a=b`. Values are never escaped; anything that could
//!   contain `=` or newlines is expected to be percent-encoded by the codec.
//! - Key and value are trimmed of surrounding whitespace.
//! - Lines shorter than two characters are skipped (blank lines, stray `\r`).
//! - A line without any `=` is malformed. It is reported and skipped; the
//!   lines after it still load.
//! - Bytes that are not UTF-8 become U+FFFD; the line still loads.
//!
//! [`check_entry`] guards the write side: a key or value that would not
//! parse back to itself is refused before it reaches the store.
//!
//! # Failure handling
//!
//! Reading never fails outright. [`read_store_file`] returns whatever entries
//! were parsed together with a [`LoadStatus`]: a missing file is
//! [`Absent`](LoadStatus::Absent) (a fresh install), any other I/O error is
//! [`Failed`](LoadStatus::Failed) and keeps the entries read before it.
//! Writing does return errors; the store decides what to do with them.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::FlatfigError;
use crate::types::SearchPath;

/// A line that could not be parsed as an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
}

/// Entries parsed from file content, in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub entries: Vec<(String, String)>,
    pub malformed: Vec<MalformedLine>,
}

/// How reading the backing file went.
#[derive(Debug)]
pub enum LoadStatus {
    /// The file was read to the end.
    Loaded,
    /// There was no file. The store starts empty.
    Absent,
    /// Opening or reading failed part way. Entries read before the failure
    /// were kept.
    Failed(std::io::Error),
}

/// Outcome of [`ConfigStore::load`](crate::ConfigStore::load).
#[derive(Debug)]
pub struct LoadReport {
    pub status: LoadStatus,
    /// Number of entries now held in the store.
    pub entries: usize,
    pub malformed: Vec<MalformedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded | LoadStatus::Absent) && self.malformed.is_empty()
    }
}

enum Line {
    Skip,
    Entry(String, String),
    Malformed,
}

fn parse_line(line: &str) -> Line {
    if line.chars().count() < 2 {
        return Line::Skip;
    }
    match line.split_once('=') {
        Some((key, value)) => Line::Entry(key.trim().to_string(), value.trim().to_string()),
        None => Line::Malformed,
    }
}

/// Pure function: parse file content into entries.
pub fn parse_document(content: &str) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    for (idx, line) in content.lines().enumerate() {
        push_line(&mut doc, idx + 1, line);
    }
    doc
}

fn push_line(doc: &mut ParsedDocument, line_no: usize, line: &str) {
    match parse_line(line) {
        Line::Skip => {}
        Line::Entry(key, value) => doc.entries.push((key, value)),
        Line::Malformed => doc.malformed.push(MalformedLine {
            line: line_no,
            text: line.to_string(),
        }),
    }
}

/// Pure function: render entries as file content, one `key = value` line each.
/// A `None` value (null string) renders as an empty value.
pub fn render_document<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value.unwrap_or_default());
        out.push('\n');
    }
    out
}

/// I/O wrapper: read and parse the file line by line.
///
/// Bytes that are not valid UTF-8 (a file saved in a legacy code page) are
/// replaced with U+FFFD and reading carries on, so every line still loads.
/// Only a real I/O error stops the read; the entries before it are returned.
pub fn read_store_file(path: &Path) -> (ParsedDocument, LoadStatus) {
    let mut doc = ParsedDocument::default();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (doc, LoadStatus::Absent),
        Err(e) => return (doc, LoadStatus::Failed(e)),
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                line_no += 1;
                let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
                let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
                push_line(&mut doc, line_no, &String::from_utf8_lossy(bytes));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return (doc, LoadStatus::Failed(e)),
        }
    }
    (doc, LoadStatus::Loaded)
}

/// Keys and raw values must survive a save and reload unchanged: a key
/// cannot be empty, contain `=` or a line break, or carry surrounding
/// whitespace, and a value cannot contain a line break.
pub fn check_entry(key: &str, raw: Option<&str>) -> Result<(), FlatfigError> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.contains('=') {
        Some("key contains '='")
    } else if key.contains(['\n', '\r']) {
        Some("key contains a line break")
    } else if key.trim() != key {
        Some("key has leading or trailing whitespace")
    } else if raw.is_some_and(|r| r.contains(['\n', '\r'])) {
        Some("value contains a line break")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(FlatfigError::InvalidEntry {
            key: key.into(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

/// I/O wrapper: overwrite the file with `content`, creating parent
/// directories if needed.
pub fn write_store_file(path: &Path, content: &str) -> Result<(), FlatfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FlatfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| FlatfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve a [`SearchPath`] to the concrete file path.
///
/// `app_name` is needed only by [`SearchPath::Platform`], which builds the
/// platform config directory (e.g. `~/.config/{app_name}/` on Linux).
pub fn resolve_store_path(
    location: &SearchPath,
    file_name: &str,
    app_name: Option<&str>,
) -> Result<PathBuf, FlatfigError> {
    let dir = match location {
        SearchPath::Platform => {
            let app = app_name.ok_or(FlatfigError::AppNameRequired)?;
            let proj =
                directories::ProjectDirs::from("", "", app).ok_or(FlatfigError::NoStorePath)?;
            proj.config_dir().to_path_buf()
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new().ok_or(FlatfigError::NoStorePath)?;
            user.home_dir().join(subdir)
        }
        SearchPath::Cwd => std::env::current_dir().map_err(|_| FlatfigError::NoStorePath)?,
        SearchPath::Path(p) => p.clone(),
    };
    Ok(dir.join(file_name))
}
