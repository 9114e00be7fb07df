//! Parsed config documents that preserve everything they do not own.
//!
//! JSON documents keep their key order (`serde_json` with `preserve_order`);
//! TOML documents are edited with `toml_edit`, so comments and formatting
//! outside the touched entry survive the round trip.

use std::path::PathBuf;

use serde_json::{Map, Value};
use setup_meta::ConfigFormat;
use toml_edit::{DocumentMut, InlineTable, Item, Table};

use crate::error::{Error, Result};

/// A config file's content, parsed according to its target's format.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    body: Body,
}

#[derive(Debug, Clone)]
enum Body {
    Json(Map<String, Value>),
    Toml(DocumentMut),
}

impl ConfigDocument {
    /// An empty document for a file that does not exist yet.
    pub fn empty(format: ConfigFormat, path: impl Into<PathBuf>) -> Self {
        let body = match format {
            ConfigFormat::Json => Body::Json(Map::new()),
            ConfigFormat::Toml => Body::Toml(DocumentMut::new()),
        };
        Self {
            path: path.into(),
            body,
        }
    }

    /// Parse `source`. Whitespace-only sources yield an empty document.
    pub fn parse(format: ConfigFormat, path: impl Into<PathBuf>, source: &str) -> Result<Self> {
        let path = path.into();
        if source.trim().is_empty() {
            return Ok(Self::empty(format, path));
        }

        let body = match format {
            ConfigFormat::Json => {
                let value: Value = serde_json::from_str(source).map_err(|e| Error::Parse {
                    path: path.clone(),
                    format: format.as_str(),
                    message: e.to_string(),
                })?;
                match value {
                    Value::Object(map) => Body::Json(map),
                    _ => {
                        return Err(Error::NotAMap {
                            path,
                            key: "<root>".into(),
                        });
                    }
                }
            }
            ConfigFormat::Toml => {
                let doc: DocumentMut = source.parse().map_err(|e: toml_edit::TomlError| {
                    Error::Parse {
                        path: path.clone(),
                        format: format.as_str(),
                        message: e.to_string(),
                    }
                })?;
                Body::Toml(doc)
            }
        };

        Ok(Self { path, body })
    }

    /// The entry stored under `wrapper_key.entry_key`, as a JSON value.
    ///
    /// Fails if the wrapper exists but is not a map.
    pub fn entry(&self, wrapper_key: &str, entry_key: &str) -> Result<Option<Value>> {
        match &self.body {
            Body::Json(root) => match root.get(wrapper_key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Object(servers)) => Ok(servers.get(entry_key).cloned()),
                Some(_) => Err(self.not_a_map(wrapper_key)),
            },
            Body::Toml(doc) => match doc.get(wrapper_key) {
                None => Ok(None),
                Some(item) => {
                    let servers = item
                        .as_table_like()
                        .ok_or_else(|| self.not_a_map(wrapper_key))?;
                    Ok(servers.get(entry_key).map(item_to_json))
                }
            },
        }
    }

    /// Insert or replace `wrapper_key.entry_key`, creating the wrapper map if
    /// needed. Every other key is left untouched.
    pub fn upsert(&mut self, wrapper_key: &str, entry_key: &str, native: &Value) -> Result<()> {
        let path = self.path.clone();
        let not_a_map = |key: &str| Error::NotAMap {
            path: path.clone(),
            key: key.to_string(),
        };

        match &mut self.body {
            Body::Json(root) => {
                let servers = root
                    .entry(wrapper_key.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if servers.is_null() {
                    *servers = Value::Object(Map::new());
                }
                let servers = servers
                    .as_object_mut()
                    .ok_or_else(|| not_a_map(wrapper_key))?;
                servers.insert(entry_key.to_string(), native.clone());
            }
            Body::Toml(doc) => {
                let fields = native.as_object().ok_or_else(|| not_a_map(entry_key))?;
                let root = doc.as_table_mut();
                if !root.contains_key(wrapper_key) {
                    let mut servers = Table::new();
                    servers.set_implicit(true);
                    root.insert(wrapper_key, Item::Table(servers));
                }
                match root.get_mut(wrapper_key) {
                    Some(Item::Table(servers)) => {
                        servers.insert(entry_key, Item::Table(json_to_table(fields)));
                    }
                    Some(Item::Value(toml_edit::Value::InlineTable(servers))) => {
                        let inline = toml_edit::Value::InlineTable(json_to_inline(fields));
                        servers.insert(entry_key, inline);
                    }
                    _ => return Err(not_a_map(wrapper_key)),
                }
            }
        }
        Ok(())
    }

    /// Serialize the document for writing.
    pub fn render(&self) -> Result<String> {
        match &self.body {
            Body::Json(root) => {
                let mut rendered =
                    serde_json::to_string_pretty(root).map_err(|e| Error::Render {
                        format: ConfigFormat::Json.as_str(),
                        message: e.to_string(),
                    })?;
                rendered.push('\n');
                Ok(rendered)
            }
            Body::Toml(doc) => Ok(doc.to_string()),
        }
    }

    fn not_a_map(&self, key: &str) -> Error {
        Error::NotAMap {
            path: self.path.clone(),
            key: key.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// TOML <-> JSON conversion
// ---------------------------------------------------------------------------

fn item_to_json(item: &Item) -> Value {
    match item {
        Item::Value(v) => value_to_json(v),
        Item::Table(t) => Value::Object(
            t.iter()
                .map(|(k, v)| (k.to_string(), item_to_json(v)))
                .collect(),
        ),
        Item::ArrayOfTables(arr) => Value::Array(
            arr.iter()
                .map(|t| {
                    Value::Object(
                        t.iter()
                            .map(|(k, v)| (k.to_string(), item_to_json(v)))
                            .collect(),
                    )
                })
                .collect(),
        ),
        Item::None => Value::Null,
    }
}

fn value_to_json(v: &toml_edit::Value) -> Value {
    match v {
        toml_edit::Value::String(s) => Value::String(s.value().to_string()),
        toml_edit::Value::Integer(i) => Value::Number((*i.value()).into()),
        toml_edit::Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(d) => Value::String(d.to_string()),
        toml_edit::Value::Array(arr) => Value::Array(arr.iter().map(value_to_json).collect()),
        toml_edit::Value::InlineTable(t) => Value::Object(
            t.iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect(),
        ),
    }
}

fn json_to_table(fields: &Map<String, Value>) -> Table {
    let mut table = Table::new();
    for (key, value) in fields {
        match value {
            Value::Object(inner) => {
                table.insert(key, Item::Table(json_to_table(inner)));
            }
            other => {
                if let Some(v) = json_to_value(other) {
                    table.insert(key, Item::Value(v));
                }
            }
        }
    }
    table
}

fn json_to_inline(fields: &Map<String, Value>) -> InlineTable {
    fields
        .iter()
        .filter_map(|(k, v)| json_to_value(v).map(|v| (k.as_str(), v)))
        .collect()
}

fn json_to_value(value: &Value) -> Option<toml_edit::Value> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some((*b).into()),
        Value::Number(n) => n
            .as_i64()
            .map(toml_edit::Value::from)
            .or_else(|| n.as_f64().map(toml_edit::Value::from)),
        Value::String(s) => Some(s.as_str().into()),
        Value::Array(items) => Some(toml_edit::Value::Array(
            items.iter().filter_map(json_to_value).collect(),
        )),
        Value::Object(inner) => Some(toml_edit::Value::InlineTable(json_to_inline(inner))),
    }
}
