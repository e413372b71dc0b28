use std::fmt;
use std::ops::Index;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use super::error::ConfigError;
use super::loader::parse_document;

static NULL: Value = Value::Null;

/// Parsed configuration: a YAML mapping with two ways in.
///
/// Subscript access mirrors `serde_yaml::Value` indexing and yields
/// `Value::Null` for absent keys:
///
/// ```
/// use flowers::ConfigBox;
///
/// let cfg = ConfigBox::from_yaml_str("model:\n  epochs: 10\n")?;
/// assert_eq!(cfg["model"]["epochs"].as_u64(), Some(10));
/// assert_eq!(cfg.section("model")?.value::<u64>("epochs")?, 10);
/// # Ok::<(), flowers::ConfigError>(())
/// ```
///
/// Field-style access goes through [`ConfigBox::section`] and
/// [`ConfigBox::value`], which fail loudly on missing keys or wrong types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigBox {
    inner: Mapping,
}

impl ConfigBox {
    /// Parses YAML text directly, with the same rules as the file loader.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        parse_document(text, Path::new("<string>"))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Top-level keys that are strings, in document order.
    ///
    /// Non-string keys (`1: one`) are skipped; use [`ConfigBox::raw_keys`]
    /// to see every key.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().filter_map(Value::as_str)
    }

    /// Every top-level key, whatever its YAML type.
    pub fn raw_keys(&self) -> impl Iterator<Item = &Value> {
        self.inner.keys()
    }

    /// Number of top-level entries, counting non-string keys too.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.inner
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.inner)
    }

    /// Nested mapping under `key`, itself a `ConfigBox`.
    pub fn section(&self, key: &str) -> Result<ConfigBox, ConfigError> {
        match self.get(key) {
            Some(Value::Mapping(m)) => Ok(ConfigBox { inner: m.clone() }),
            Some(other) => Err(ConfigError::NotAMapping {
                key: key.to_string(),
                found: kind_of(other),
            }),
            None => Err(ConfigError::MissingKey(key.to_string())),
        }
    }

    /// Value under `key`, deserialized into `T`.
    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        serde_yaml::from_value(value.clone()).map_err(|source| ConfigError::Type {
            key: key.to_string(),
            source,
        })
    }

    /// Walks a dotted path such as `"model.layers.0.units"`.
    ///
    /// Numeric segments index into sequences, and match integer keys in
    /// mappings when no string key of that name exists.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = mapping_entry(&self.inner, segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Sequence(seq) => seq.get(segment.parse::<usize>().ok()?)?,
                Value::Mapping(m) => mapping_entry(m, segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn lookup_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = self
            .lookup(path)
            .ok_or_else(|| ConfigError::MissingKey(path.to_string()))?;
        serde_yaml::from_value(value.clone()).map_err(|source| ConfigError::Type {
            key: path.to_string(),
            source,
        })
    }

    /// Deserializes the whole configuration into a typed schema.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_yaml::from_value(Value::Mapping(self.inner.clone())).map_err(ConfigError::Extract)
    }
}

fn mapping_entry<'a>(mapping: &'a Mapping, segment: &str) -> Option<&'a Value> {
    mapping.get(segment).or_else(|| {
        let number = match segment.parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(segment.parse::<i64>().ok()?),
        };
        mapping.get(&number)
    })
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl From<Mapping> for ConfigBox {
    fn from(inner: Mapping) -> Self {
        Self { inner }
    }
}

impl TryFrom<Value> for ConfigBox {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(inner) => Ok(Self { inner }),
            other => Err(ConfigError::NotAMapping {
                key: ".".to_string(),
                found: kind_of(&other),
            }),
        }
    }
}

impl Index<&str> for ConfigBox {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Display for ConfigBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_yaml::to_string(&self.inner).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
