//! Translation between the canonical [`ServiceEntry`] and each config
//! family's native entry shape.
//!
//! Every family has exactly one pair of functions here: one producing the
//! native value, one reading it back. The injection engine never branches on
//! the family itself.
//!
//! Native shapes are expressed as JSON values; TOML documents convert to and
//! from this representation at the document boundary.

use serde_json::{Map, Value, json};
use setup_meta::ConfigFamily;
use std::collections::BTreeMap;

use crate::entry::ServiceEntry;

/// Convert the canonical entry into the native value for `family`.
pub fn to_native(entry: &ServiceEntry, family: ConfigFamily) -> Value {
    match family {
        ConfigFamily::JsonMap { type_field, .. } => {
            let mut obj = Map::new();
            if let Some(type_val) = type_field {
                obj.insert("type".into(), json!(type_val));
            }
            obj.insert("command".into(), json!(entry.command));
            obj.insert("args".into(), json!(entry.args));
            obj.insert("env".into(), json!(entry.env));
            Value::Object(obj)
        }
        ConfigFamily::JsonCommandTokens { .. } => {
            let mut tokens = Vec::with_capacity(entry.args.len() + 1);
            tokens.push(entry.command.clone());
            tokens.extend(entry.args.iter().cloned());

            let mut obj = Map::new();
            obj.insert("type".into(), json!("local"));
            obj.insert("command".into(), json!(tokens));
            obj.insert("environment".into(), json!(entry.env));
            obj.insert("enabled".into(), json!(true));
            Value::Object(obj)
        }
        ConfigFamily::TomlTable { .. } => {
            let mut obj = Map::new();
            obj.insert("command".into(), json!(entry.command));
            obj.insert("args".into(), json!(entry.args));
            obj.insert("env".into(), json!(entry.env));
            Value::Object(obj)
        }
    }
}

/// Read a native value back into the canonical entry.
///
/// Returns `None` if the value does not have the shape `family` produces.
pub fn from_native(value: &Value, family: ConfigFamily) -> Option<ServiceEntry> {
    let obj = value.as_object()?;
    match family {
        ConfigFamily::JsonMap { .. } | ConfigFamily::TomlTable { .. } => {
            let command = obj.get("command")?.as_str()?.to_string();
            let args = obj.get("args").map_or(Some(Vec::new()), string_list)?;
            let env = obj.get("env").map_or(Some(BTreeMap::new()), string_map)?;
            Some(ServiceEntry { command, args, env })
        }
        ConfigFamily::JsonCommandTokens { .. } => {
            let mut tokens = string_list(obj.get("command")?)?.into_iter();
            let command = tokens.next()?;
            let args = tokens.collect();
            let env = obj
                .get("environment")
                .map_or(Some(BTreeMap::new()), string_map)?;
            Some(ServiceEntry { command, args, env })
        }
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

fn string_map(value: &Value) -> Option<BTreeMap<String, String>> {
    value
        .as_object()?
        .iter()
        .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}
