//! Dynamic values for message arguments.
//!
//! A [`Value`] is anything a caller may hand to the formatter: scalars,
//! lists, maps, and opaque handles that are not plain data. Lists and maps
//! are shared and mutable, so a structure can refer to itself; the
//! renderers detect such cycles instead of recursing forever.
//!
//! ```rust
//! use tintline::Value;
//!
//! let user = Value::map([("name", Value::from("ada")), ("id", Value::from(7))]);
//! user.insert("self", user.clone());
//! assert!(user.is_map());
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::Serialize;

use crate::inspect::{inspect, InspectOptions};

/// Shared, mutable list storage.
pub type SharedList = Arc<RwLock<Vec<Value>>>;
/// Shared, mutable map storage, in insertion order.
pub type SharedMap = Arc<RwLock<Vec<(String, Value)>>>;

/// A message argument.
#[derive(Clone)]
pub enum Value {
    /// No value supplied.
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(SharedList),
    Map(SharedMap),
    /// A value that is not plain data (a handle, a callback, ...), shown by label.
    Opaque(String),
}

impl Value {
    /// Creates a list.
    pub fn list<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(Arc::new(RwLock::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Creates a map. Later duplicate keys replace earlier ones.
    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let map = Value::Map(Arc::new(RwLock::new(Vec::new())));
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Creates an opaque value shown as `[label]`.
    pub fn opaque(label: impl Into<String>) -> Value {
        Value::Opaque(label.into())
    }

    /// Converts any serializable value. Serialization failures become an
    /// opaque value carrying the error message.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Value {
        match serde_json::to_value(data) {
            Ok(json) => Value::from(json),
            Err(err) => Value::Opaque(format!("unserializable: {}", err)),
        }
    }

    /// Appends to a list. Returns `false` if this is not a list.
    pub fn push(&self, item: impl Into<Value>) -> bool {
        match self {
            Value::List(list) => {
                list.write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(item.into());
                true
            }
            _ => false,
        }
    }

    /// Sets a map entry, replacing an existing key in place. Returns `false`
    /// if this is not a map.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        match self {
            Value::Map(map) => {
                let key = key.into();
                let value = value.into();
                let mut entries = map.write().unwrap_or_else(PoisonError::into_inner);
                match entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
                true
            }
            _ => false,
        }
    }

    /// Looks up a map entry by key.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => read(map)
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Number of list items or map entries; `0` for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::List(list) => read(list).len(),
            Value::Map(map) => read(map).len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric reading of this value, if it has one.
    ///
    /// Booleans read as `1`/`0`, `null` as `0`; strings must parse as a
    /// number after trimming. Containers, opaque values and `undefined`
    /// have no numeric reading.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            Value::Undefined | Value::List(_) | Value::Map(_) | Value::Opaque(_) => None,
        }
    }

    /// Identity of a list or map allocation, used for cycle detection.
    pub(crate) fn container_id(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(Arc::as_ptr(list) as *const () as usize),
            Value::Map(map) => Some(Arc::as_ptr(map) as *const () as usize),
            _ => None,
        }
    }
}

/// Read access that survives a poisoned lock.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Formats a number the way a console prints it: integral values without a
/// fraction, `NaN`, `Infinity`, `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

// Children of uniquely owned containers are moved onto a work list, so a
// deeply nested value is freed without recursing once per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);
        while let Some(mut child) = pending.pop() {
            take_children(&mut child, &mut pending);
        }
    }
}

fn take_children(value: &mut Value, pending: &mut Vec<Value>) {
    match value {
        Value::List(list) => {
            if let Some(lock) = Arc::get_mut(list) {
                let items = lock.get_mut().unwrap_or_else(PoisonError::into_inner);
                pending.append(items);
            }
        }
        Value::Map(map) => {
            if let Some(lock) = Arc::get_mut(map) {
                let entries = lock.get_mut().unwrap_or_else(PoisonError::into_inner);
                pending.extend(entries.drain(..).map(|(_, v)| v));
            }
        }
        _ => {}
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self, &InspectOptions::plain()))
    }
}

// Structural equality. The same allocation compares equal without descending;
// two distinct cyclic structures do not terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                Arc::ptr_eq(a, b) || *read(a) == *read(b)
            }
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b) || *read(a) == *read(b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(entries) => Value::map(entries),
        }
    }
}
