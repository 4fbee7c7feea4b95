//! Output schemas for structured generation.
//!
//! A [`Schema`] is used three times for a single call: rendered into the prompt,
//! translated into the provider's `responseSchema`, and finally used to check the
//! payload that comes back. Keeping one value for all three means a malformed
//! model response is rejected here instead of surfacing as a missing field later.

use serde_json::{Map, Value, json};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        description: Option<&'static str>,
        min_length: usize,
    },
    Array {
        description: Option<&'static str>,
        items: Box<Schema>,
        min_items: usize,
    },
    Object {
        description: Option<&'static str>,
        properties: Vec<(&'static str, Schema)>,
        required: Vec<&'static str>,
    },
}

/// Where and why a payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl Schema {
    pub fn string(description: &'static str) -> Self {
        Schema::String {
            description: Some(description),
            min_length: 0,
        }
    }

    pub fn array(description: &'static str, items: Schema) -> Self {
        Schema::Array {
            description: Some(description),
            items: Box::new(items),
            min_items: 0,
        }
    }

    /// Object whose listed properties are all required.
    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| *name).collect();
        Schema::Object {
            description: None,
            properties,
            required,
        }
    }

    pub fn non_empty(self) -> Self {
        match self {
            Schema::String { description, .. } => Schema::String {
                description,
                min_length: 1,
            },
            Schema::Array {
                description, items, ..
            } => Schema::Array {
                description,
                items,
                min_items: 1,
            },
            other => other,
        }
    }

    /// Standard JSON Schema rendering, embedded in prompts.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::String {
                description,
                min_length,
            } => {
                let mut node = typed_node("string", *description);
                if *min_length > 0 {
                    node.insert("minLength".into(), json!(min_length));
                }
                Value::Object(node)
            }
            Schema::Array {
                description,
                items,
                min_items,
            } => {
                let mut node = typed_node("array", *description);
                node.insert("items".into(), items.to_json_schema());
                if *min_items > 0 {
                    node.insert("minItems".into(), json!(min_items));
                }
                Value::Object(node)
            }
            Schema::Object {
                description,
                properties,
                required,
            } => {
                let mut node = typed_node("object", *description);
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_json_schema()))
                    .collect();
                node.insert("properties".into(), Value::Object(props));
                node.insert("required".into(), json!(required));
                Value::Object(node)
            }
        }
    }

    /// Gemini's OpenAPI-subset schema: uppercase type names, no `minLength`,
    /// and an explicit `propertyOrdering` so fields come back in declaration order.
    pub fn to_gemini_schema(&self) -> Value {
        match self {
            Schema::String { description, .. } => {
                Value::Object(typed_node("STRING", *description))
            }
            Schema::Array {
                description,
                items,
                min_items,
            } => {
                let mut node = typed_node("ARRAY", *description);
                node.insert("items".into(), items.to_gemini_schema());
                if *min_items > 0 {
                    // int64 fields travel as strings in Gemini's JSON mapping
                    node.insert("minItems".into(), json!(min_items.to_string()));
                }
                Value::Object(node)
            }
            Schema::Object {
                description,
                properties,
                required,
            } => {
                let mut node = typed_node("OBJECT", *description);
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_gemini_schema()))
                    .collect();
                let ordering: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
                node.insert("properties".into(), Value::Object(props));
                node.insert("required".into(), json!(required));
                node.insert("propertyOrdering".into(), json!(ordering));
                Value::Object(node)
            }
        }
    }

    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), SchemaViolation> {
        match self {
            Schema::String { min_length, .. } => {
                let s = value
                    .as_str()
                    .ok_or_else(|| violation(path, format!("expected string, got {}", kind(value))))?;
                if s.trim().chars().count() < *min_length {
                    return Err(violation(path, "must not be empty"));
                }
                Ok(())
            }
            Schema::Array {
                items, min_items, ..
            } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| violation(path, format!("expected array, got {}", kind(value))))?;
                if arr.len() < *min_items {
                    return Err(violation(
                        path,
                        format!("expected at least {} item(s), got {}", min_items, arr.len()),
                    ));
                }
                for (i, item) in arr.iter().enumerate() {
                    items.validate_at(&format!("{}[{}]", path, i), item)?;
                }
                Ok(())
            }
            Schema::Object {
                properties,
                required,
                ..
            } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| violation(path, format!("expected object, got {}", kind(value))))?;
                for name in required {
                    match obj.get(*name) {
                        None | Some(Value::Null) => {
                            return Err(violation(
                                &format!("{}.{}", path, name),
                                "missing required field",
                            ));
                        }
                        Some(_) => {}
                    }
                }
                for (name, schema) in properties {
                    if let Some(field) = obj.get(*name) {
                        if field.is_null() && !required.contains(name) {
                            continue;
                        }
                        schema.validate_at(&format!("{}.{}", path, name), field)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn typed_node(type_name: &str, description: Option<&str>) -> Map<String, Value> {
    let mut node = Map::new();
    node.insert("type".into(), json!(type_name));
    if let Some(desc) = description {
        node.insert("description".into(), json!(desc));
    }
    node
}

fn violation(path: &str, reason: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
