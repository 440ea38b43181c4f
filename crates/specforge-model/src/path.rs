//! HTTP verbs and per-path operation tables.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml_ng::Value;

use crate::operation::Operation;

/// HTTP verbs an operation can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `TRACE`
    Trace,
}

impl HttpMethod {
    /// Every verb, in the order OpenAPI lists them.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Exact (lowercase) path item key, e.g. `"get"`.
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == key)
    }

    /// Lowercase key used in the path item (e.g., `"get"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Error returned when parsing a string that is not a known HTTP verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Case-insensitive: `"GET"`, `"get"` and `"Get"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Operations registered under one path, keyed by verb.
///
/// Holds at most one operation per verb. [`PathItem::insert`] refuses to
/// overwrite an occupied slot and hands the operation back instead.
/// Path-level keys (`summary`, `parameters`, `servers`, `$ref`, `x-*`) are
/// kept verbatim in [`fields`](Self::fields) and written before the verbs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    operations: IndexMap<HttpMethod, Operation>,

    /// Path-level keys other than verbs.
    pub fields: IndexMap<String, Value>,
}

impl PathItem {
    /// Create an empty path item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `operation` under `method`.
    ///
    /// # Errors
    ///
    /// Returns the operation unchanged if `method` is already occupied.
    pub fn insert(&mut self, method: HttpMethod, operation: Operation) -> Result<(), Operation> {
        if self.operations.contains_key(&method) {
            return Err(operation);
        }
        self.operations.insert(method, operation);
        Ok(())
    }

    /// Whether an operation is registered for `method`.
    #[must_use]
    pub fn contains(&self, method: HttpMethod) -> bool {
        self.operations.contains_key(&method)
    }

    /// Operation registered for `method`, if any.
    #[must_use]
    pub fn get(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations.get(&method)
    }

    /// Mutable operation registered for `method`, if any.
    pub fn get_mut(&mut self, method: HttpMethod) -> Option<&mut Operation> {
        self.operations.get_mut(&method)
    }

    /// Operations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        self.operations.iter().map(|(m, op)| (*m, op))
    }

    /// Mutable operations in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (HttpMethod, &mut Operation)> {
        self.operations.iter_mut().map(|(m, op)| (*m, op))
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.operations.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        for (method, operation) in &self.operations {
            map.serialize_entry(method.as_str(), operation)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = Self::new();
        for (key, value) in raw {
            match HttpMethod::from_key(&key) {
                Some(method) => {
                    let operation: Operation = serde_yaml_ng::from_value(value)
                        .map_err(|e| D::Error::custom(format!("{key}: {e}")))?;
                    item.operations.insert(method, operation);
                }
                None => {
                    item.fields.insert(key, value);
                }
            }
        }
        Ok(item)
    }
}
