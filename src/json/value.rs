//! Conversion to `serde_json::Value`
//!
//! The anonymous view drops what a plain JSON value cannot express:
//! duplicate member names keep their first occurrence, and number literals
//! are realized.

use super::document::{JsonDocument, JsonKind, NodeRef};
use super::error::JsonError;
use super::number::JsonNumber;
use serde_json::{Map, Number, Value};

impl JsonDocument {
    /// The document as a `serde_json::Value`
    ///
    /// A root with exactly one child yields that child; any other root
    /// yields an array of its children.
    pub fn to_value(&self) -> Result<Value, JsonError> {
        self.root().to_value()
    }
}

impl NodeRef<'_> {
    /// This node as a `serde_json::Value`
    pub fn to_value(&self) -> Result<Value, JsonError> {
        match self.kind() {
            JsonKind::Root => {
                if self.len()? == 1 {
                    return self.child(0)?.to_value();
                }
                self.array_value()
            }
            JsonKind::Object => {
                let mut map = Map::new();
                for child in self.children()? {
                    let name = child.name().unwrap_or_default();
                    if !map.contains_key(name) {
                        map.insert(name.to_string(), child.to_value()?);
                    }
                }
                Ok(Value::Object(map))
            }
            JsonKind::Array => self.array_value(),
            JsonKind::String => Ok(Value::String(self.as_str()?.to_string())),
            JsonKind::Bool => Ok(Value::Bool(self.as_bool()?)),
            JsonKind::Number => Ok(number_value(self.number()?)),
            JsonKind::Unknown => Ok(Value::Null),
        }
    }

    fn array_value(&self) -> Result<Value, JsonError> {
        self.children()?
            .map(|child| child.to_value())
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

fn number_value(number: JsonNumber) -> Value {
    match number {
        JsonNumber::Integer(i) => Value::Number(i.into()),
        JsonNumber::Float(f) => float_value(f),
        JsonNumber::Decimal(_) => match number.as_i64() {
            Some(i) => Value::Number(i.into()),
            None => float_value(number.as_f64()),
        },
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
