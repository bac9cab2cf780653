//! Format-agnostic structured documents.
//!
//! A [`Document`] is the common shape of the YAML config and the JSON manifest:
//! scalars, ordered sequences, and string-keyed mappings that remember insertion
//! order so a document re-serializes the way it was read.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_yaml::value::TaggedValue;

/// A numeric scalar, keeping the integer/float distinction of the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
  PosInt(u64),
  NegInt(i64),
  Float(f64),
}

/// A recursively defined structured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Document {
  #[default]
  Null,
  Bool(bool),
  Number(Number),
  String(String),
  Sequence(Vec<Document>),
  Mapping(Mapping),
  /// A YAML value carrying an explicit tag such as `!vault`. Kept verbatim.
  Tagged(Box<TaggedValue>),
}

impl Document {
  pub fn is_null(&self) -> bool {
    matches!(self, Document::Null)
  }

  pub fn as_mapping(&self) -> Option<&Mapping> {
    match self {
      Document::Mapping(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
    match self {
      Document::Mapping(m) => Some(m),
      _ => None,
    }
  }

  /// Short name of the value kind, for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      Document::Null => "null",
      Document::Bool(_) => "boolean",
      Document::Number(_) => "number",
      Document::String(_) => "string",
      Document::Sequence(_) => "sequence",
      Document::Mapping(_) => "mapping",
      Document::Tagged(_) => "tagged value",
    }
  }
}

impl From<&str> for Document {
  fn from(value: &str) -> Self {
    Document::String(value.to_string())
  }
}

impl From<String> for Document {
  fn from(value: String) -> Self {
    Document::String(value)
  }
}

impl From<bool> for Document {
  fn from(value: bool) -> Self {
    Document::Bool(value)
  }
}

impl From<i64> for Document {
  fn from(value: i64) -> Self {
    if value < 0 {
      Document::Number(Number::NegInt(value))
    } else {
      Document::Number(Number::PosInt(value as u64))
    }
  }
}

/// String-keyed map that preserves insertion order.
///
/// Equality ignores key order: two mappings are equal when they hold the same
/// keys bound to equal values.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
  entries: Vec<(String, Document)>,
}

impl Mapping {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  pub fn get(&self, key: &str) -> Option<&Document> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
    self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
  }

  /// Insert a value, replacing in place if the key exists and appending otherwise.
  ///
  /// Returns the previous value for the key, if any.
  pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
    let key = key.into();
    match self.get_mut(&key) {
      Some(slot) => Some(std::mem::replace(slot, value)),
      None => {
        self.entries.push((key, value));
        None
      }
    }
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl PartialEq for Mapping {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
  }
}

impl<K: Into<String>> FromIterator<(K, Document)> for Mapping {
  fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
    let mut mapping = Mapping::new();
    for (k, v) in iter {
      mapping.insert(k, v);
    }
    mapping
  }
}

impl Serialize for Number {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match *self {
      Number::PosInt(n) => serializer.serialize_u64(n),
      Number::NegInt(n) => serializer.serialize_i64(n),
      Number::Float(n) => serializer.serialize_f64(n),
    }
  }
}

impl Serialize for Document {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Document::Null => serializer.serialize_unit(),
      Document::Bool(b) => serializer.serialize_bool(*b),
      Document::Number(n) => n.serialize(serializer),
      Document::String(s) => serializer.serialize_str(s),
      Document::Sequence(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Document::Mapping(mapping) => mapping.serialize(serializer),
      Document::Tagged(tagged) => tagged.serialize(serializer),
    }
  }
}

impl Serialize for Mapping {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.len()))?;
    for (k, v) in self.iter() {
      map.serialize_entry(k, v)?;
    }
    map.end()
  }
}

/// Converting YAML fails when two keys read as the same string, e.g. `1` and
/// `'1'`; keeping only one of them would drop user data on the next write.
impl TryFrom<serde_yaml::Value> for Document {
  type Error = serde_yaml::Error;

  fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
    use serde_yaml::Value;

    Ok(match value {
      Value::Null => Document::Null,
      Value::Bool(b) => Document::Bool(b),
      Value::Number(n) => Document::Number(yaml_number(&n)),
      Value::String(s) => Document::String(s),
      Value::Sequence(items) => {
        Document::Sequence(items.into_iter().map(Document::try_from).collect::<Result<_, _>>()?)
      }
      Value::Mapping(map) => Document::Mapping(yaml_mapping(map)?),
      Value::Tagged(tagged) => Document::Tagged(tagged),
    })
  }
}

impl From<serde_json::Value> for Document {
  fn from(value: serde_json::Value) -> Self {
    use serde_json::Value;

    match value {
      Value::Null => Document::Null,
      Value::Bool(b) => Document::Bool(b),
      Value::Number(n) => Document::Number(json_number(&n)),
      Value::String(s) => Document::String(s),
      Value::Array(items) => Document::Sequence(items.into_iter().map(Document::from).collect()),
      Value::Object(map) => Document::Mapping(map.into_iter().map(|(k, v)| (k, Document::from(v))).collect()),
    }
  }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
  if let Some(u) = n.as_u64() {
    Number::PosInt(u)
  } else if let Some(i) = n.as_i64() {
    Number::NegInt(i)
  } else {
    Number::Float(n.as_f64().unwrap_or(f64::NAN))
  }
}

fn json_number(n: &serde_json::Number) -> Number {
  if let Some(u) = n.as_u64() {
    Number::PosInt(u)
  } else if let Some(i) = n.as_i64() {
    Number::NegInt(i)
  } else {
    Number::Float(n.as_f64().unwrap_or(f64::NAN))
  }
}

fn yaml_mapping(map: serde_yaml::Mapping) -> Result<Mapping, serde_yaml::Error> {
  let mut mapping = Mapping::new();
  for (key, value) in map {
    let key = yaml_key(key);
    if mapping.contains_key(&key) {
      return Err(serde::de::Error::custom(format!(
        "duplicate mapping key `{key}` once keys are read as strings"
      )));
    }
    mapping.insert(key, Document::try_from(value)?);
  }
  Ok(mapping)
}

/// Mapping keys must be strings; YAML allows any scalar (or worse) as a key.
fn yaml_key(key: serde_yaml::Value) -> String {
  use serde_yaml::Value;

  match key {
    Value::String(s) => s,
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::Tagged(tagged) => yaml_key(tagged.value),
    other => serde_yaml::to_string(&other)
      .map(|s| s.trim_end().to_string())
      .unwrap_or_default(),
  }
}
