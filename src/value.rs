//! Typed values held in the parsed tier of the store.
//!
//! The set of supported types is closed: every value is one of the [`Value`]
//! variants. Callers pick a type through the accessor's type parameter
//! (`store.get::<bool>(..)`), which resolves to one of the sealed [`Setting`]
//! implementations below. Each implementation knows how to wrap itself into a
//! `Value`, how to read itself back out, and which [`codec`](crate::codec)
//! function decodes its raw text.

use std::fmt;

use crate::codec;
use crate::error::FlatfigError;

/// A parsed, typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    /// `None` is the null string. It is persisted as an empty value but kept
    /// distinct from `Some("")` while in memory.
    Text(Option<String>),
    StringList(Vec<String>),
    IntList(Vec<i32>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Text(_) => ValueKind::Text,
            Value::StringList(_) => ValueKind::StringList,
            Value::IntList(_) => ValueKind::IntList,
        }
    }
}

/// Tag of a [`Value`] variant, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int32,
    Int64,
    Text,
    StringList,
    IntList,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Int32 => "32-bit integer",
            ValueKind::Int64 => "64-bit integer",
            ValueKind::Text => "string",
            ValueKind::StringList => "string list",
            ValueKind::IntList => "integer list",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for String {}
    impl Sealed for Option<String> {}
    impl Sealed for Vec<String> {}
    impl Sealed for Vec<i32> {}
}

/// A Rust type that maps onto exactly one [`Value`] variant.
///
/// Sealed: the supported set is fixed by the file format.
pub trait Setting: sealed::Sealed + Clone {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    /// Read the cached value back out. `None` when the cached variant is a
    /// different kind.
    fn from_value(value: &Value) -> Option<Self>;

    /// Decode the raw text stored for `key`.
    fn decode(key: &str, raw: &str) -> Result<Self, FlatfigError>;
}

/// Single-valued settings, read with [`ConfigStore::get`](crate::ConfigStore::get).
pub trait Scalar: Setting {}

/// Comma-joined list settings, read with
/// [`ConfigStore::get_array`](crate::ConfigStore::get_array).
pub trait Array: Setting {}

impl Setting for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn decode(_key: &str, raw: &str) -> Result<Self, FlatfigError> {
        Ok(codec::decode_bool(raw))
    }
}

impl Setting for i32 {
    const KIND: ValueKind = ValueKind::Int32;

    fn into_value(self) -> Value {
        Value::Int32(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    fn decode(key: &str, raw: &str) -> Result<Self, FlatfigError> {
        codec::decode_i32(key, raw)
    }
}

impl Setting for i64 {
    const KIND: ValueKind = ValueKind::Int64;

    fn into_value(self) -> Value {
        Value::Int64(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    fn decode(key: &str, raw: &str) -> Result<Self, FlatfigError> {
        codec::decode_i64(key, raw)
    }
}

impl Setting for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(Some(self))
    }

    // A null string reads back as empty, which is also what it becomes after
    // a save and reload.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(t) => Some(t.clone().unwrap_or_default()),
            _ => None,
        }
    }

    fn decode(_key: &str, raw: &str) -> Result<Self, FlatfigError> {
        Ok(raw.to_string())
    }
}

impl Setting for Option<String> {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(t) => Some(t.clone()),
            _ => None,
        }
    }

    fn decode(_key: &str, raw: &str) -> Result<Self, FlatfigError> {
        Ok(Some(raw.to_string()))
    }
}

impl Setting for Vec<String> {
    const KIND: ValueKind = ValueKind::StringList;

    fn into_value(self) -> Value {
        Value::StringList(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::StringList(list) => Some(list.clone()),
            _ => None,
        }
    }

    fn decode(key: &str, raw: &str) -> Result<Self, FlatfigError> {
        codec::decode_string_list(key, raw)
    }
}

impl Setting for Vec<i32> {
    const KIND: ValueKind = ValueKind::IntList;

    fn into_value(self) -> Value {
        Value::IntList(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::IntList(list) => Some(list.clone()),
            _ => None,
        }
    }

    fn decode(key: &str, raw: &str) -> Result<Self, FlatfigError> {
        codec::decode_int_list(key, raw)
    }
}

impl Scalar for bool {}
impl Scalar for i32 {}
impl Scalar for i64 {}
impl Scalar for String {}
impl Scalar for Option<String> {}

impl Array for Vec<String> {}
impl Array for Vec<i32> {}
