//! Parsed instruction document: an ordered map of top-level fields.
use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self { Self::default() }

    /// Parse YAML text. `name` is only used for error messages.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let root = serde_yaml::from_str::<Value>(source).map_err(|source| Error::Parse {
            name: name.to_string(),
            source,
        })?;
        Self::from_value(name, root)
    }

    pub fn from_value(name: &str, root: Value) -> Result<Self> {
        match root {
            Value::Null => Ok(Self::new()),
            Value::Mapping(map) => {
                let mut fields = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    let key = key_text(&k);
                    if fields.contains_key(&key) {
                        return Err(Error::DuplicateKey { name: name.to_string(), key });
                    }
                    fields.insert(key, v);
                }
                Ok(Self { fields })
            }
            other => Err(Error::NotAMapping {
                name: name.to_string(),
                found: kind_name(&other),
            }),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => crate::flow::to_flow(other),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_field_order() {
        let doc = Document::parse("lw", "zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn empty_source_is_empty_document() {
        let doc = Document::parse("empty", "").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = Document::parse("list", "- a\n- b\n").unwrap_err();
        assert!(matches!(err, Error::NotAMapping { found: "sequence", .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Document::parse("bad", "key: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::Parse { ref name, .. } if name == "bad"));
    }

    #[test]
    fn non_text_keys_are_stringified() {
        let doc = Document::parse("keys", "1: one\ntrue: yes\n").unwrap();
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["1", "true"]);
    }

    #[test]
    fn keys_that_stringify_alike_are_rejected() {
        let err = Document::parse("keys", "1: a\n'1': b\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "1"), "{err}");
    }
}
