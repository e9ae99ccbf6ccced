// SPDX-License-Identifier: Apache-2.0

use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Display;

/// Scalar rendering of an attribute value
#[derive(Clone, Debug, PartialEq)]
pub enum ConvertedAttrValue {
    Int(i64),
    Double(f64),
    Bool(bool),
    String(String),
}

impl Display for ConvertedAttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertedAttrValue::Int(i) => write!(f, "{}", i),
            ConvertedAttrValue::Double(d) => write!(f, "{}", json!(d)),
            ConvertedAttrValue::Bool(b) => write!(f, "{}", b),
            ConvertedAttrValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&Value> for ConvertedAttrValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::StringValue(s) => ConvertedAttrValue::String(s.clone()),
            Value::BoolValue(b) => ConvertedAttrValue::Bool(*b),
            Value::IntValue(i) => ConvertedAttrValue::Int(*i),
            Value::DoubleValue(d) => ConvertedAttrValue::Double(*d),
            Value::ArrayValue(a) => ConvertedAttrValue::String(json!(a).to_string()),
            Value::KvlistValue(kv) => ConvertedAttrValue::String(json!(kv).to_string()),
            Value::BytesValue(b) => ConvertedAttrValue::String(hex::encode(b)),
        }
    }
}

impl ConvertedAttrValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConvertedAttrValue::Int(i) => json!(i),
            ConvertedAttrValue::Double(d) => json!(d),
            ConvertedAttrValue::Bool(b) => json!(b),
            ConvertedAttrValue::String(s) => json!(s),
        }
    }
}

/// Read-only lookup view over an OTLP attribute list.
///
/// When a key is repeated the first occurrence wins. Attributes with no value
/// are skipped.
#[derive(Default, Debug)]
pub struct AttrMap<'a> {
    data: HashMap<&'a str, &'a Value>,
}

impl<'a> From<&'a [KeyValue]> for AttrMap<'a> {
    fn from(attrs: &'a [KeyValue]) -> Self {
        let mut data = HashMap::with_capacity(attrs.len());
        for kv in attrs {
            if let Some(value) = kv.value.as_ref().and_then(|v| v.value.as_ref()) {
                data.entry(kv.key.as_str()).or_insert(value);
            }
        }
        Self { data }
    }
}

impl<'a> AttrMap<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.data.get(key).copied()
    }

    /// Non-empty string value for `key`, other value types are absent
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        match self.get(key)? {
            Value::StringValue(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key).map(str::to_string)
    }

    /// String members of an array value. Non-string members are skipped.
    pub fn get_str_array(&self, key: &str) -> Option<Vec<&'a str>> {
        match self.get(key)? {
            Value::ArrayValue(arr) => Some(
                arr.values
                    .iter()
                    .filter_map(|v| match &v.value {
                        Some(Value::StringValue(s)) => Some(s.as_str()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
