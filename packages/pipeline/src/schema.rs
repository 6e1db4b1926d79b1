//! Schema definitions for structured extraction.
//!
//! A [`Schema`] is the caller-supplied contract describing which fields the
//! extractor should populate for one product category. Schemas are plain
//! values resolved by name from a
//! [`SchemaRegistry`](crate::registry::SchemaRegistry), so adding a category
//! means registering a new value, not defining a new Rust type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Semantic type of a schema field.
///
/// Every field is optional in a partial record regardless of kind; the kind
/// only constrains what a present value may look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    TextList,
    NumberList,
    IntegerList,
}

impl FieldKind {
    /// Human-readable name, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::TextList => "text list",
            FieldKind::NumberList => "number list",
            FieldKind::IntegerList => "integer list",
        }
    }

    /// JSON schema fragment for a nullable property of this kind.
    fn json_property(&self) -> Value {
        match self {
            FieldKind::Text => json!({ "type": ["string", "null"] }),
            FieldKind::Number => json!({ "type": ["number", "null"] }),
            FieldKind::Integer => json!({ "type": ["integer", "null"] }),
            FieldKind::TextList => json!({
                "type": ["array", "null"],
                "items": { "type": "string" }
            }),
            FieldKind::NumberList => json!({
                "type": ["array", "null"],
                "items": { "type": "number" }
            }),
            FieldKind::IntegerList => json!({
                "type": ["array", "null"],
                "items": { "type": "integer" }
            }),
        }
    }
}

/// One field of a schema: name, semantic type, and an optional hint that is
/// passed to the model to guide extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub hint: Option<String>,
}

impl FieldSpec {
    /// Create a field with no hint.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hint: None,
        }
    }

    /// Attach a descriptive hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A named, ordered set of fields to extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    /// Create an empty schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field. A field added twice replaces the earlier definition.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.insert(spec.name.clone(), spec);
        self
    }

    /// Schema name, also the registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the OpenAI strict-mode response schema for this contract.
    ///
    /// Strict mode requires every property listed in `required` (optionality
    /// is expressed through nullable types), `additionalProperties: false`,
    /// and no `$ref` indirection.
    pub fn response_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::with_capacity(self.fields.len());

        for spec in self.fields.values() {
            let mut property = spec.kind.json_property();
            if let Some(hint) = &spec.hint {
                property["description"] = json!(hint);
            }
            properties.insert(spec.name.clone(), property);
            required.push(json!(spec.name));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}
