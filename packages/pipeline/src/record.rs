//! Partial and merged record types.
//!
//! A [`PartialRecord`] holds whatever one chunk yielded; any field may be
//! absent. A [`MergedRecord`] is the finalized result for one entity after
//! merging all partials. Keeping the two distinct makes it impossible to
//! hand an unmerged fragment to a sink.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::schema::{FieldKind, Schema};

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    TextList(Vec<String>),
    NumberList(Vec<f64>),
    IntegerList(Vec<i64>),
}

impl FieldValue {
    /// Whether this value satisfies `kind`. An integer is accepted where a
    /// number is expected, the way JSON (and the model backend) treats
    /// whole numbers.
    pub fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Text(_), FieldKind::Text)
                | (FieldValue::Number(_), FieldKind::Number)
                | (FieldValue::Integer(_), FieldKind::Number)
                | (FieldValue::Integer(_), FieldKind::Integer)
                | (FieldValue::TextList(_), FieldKind::TextList)
                | (FieldValue::NumberList(_), FieldKind::NumberList)
                | (FieldValue::IntegerList(_), FieldKind::NumberList)
                | (FieldValue::IntegerList(_), FieldKind::IntegerList)
        )
    }

    /// Human-readable kind name, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Integer(_) => "integer",
            FieldValue::TextList(_) => "text list",
            FieldValue::NumberList(_) => "number list",
            FieldValue::IntegerList(_) => "integer list",
        }
    }

    /// Render as one sink cell. Lists are joined with `", "`.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::TextList(items) => items.join(", "),
            FieldValue::NumberList(items) => items
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::IntegerList(items) => items
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Interpret a JSON value as `kind`. Returns `None` when the value does
    /// not fit; JSON null is handled by the caller as "absent".
    pub fn from_json(value: &Value, kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Number => value.as_f64().map(FieldValue::Number),
            FieldKind::Integer => value.as_i64().map(FieldValue::Integer),
            FieldKind::TextList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::TextList)
            }),
            FieldKind::NumberList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(Value::as_f64)
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::NumberList)
            }),
            FieldKind::IntegerList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(Value::as_i64)
                    .collect::<Option<Vec<_>>>()
                    .map(FieldValue::IntegerList)
            }),
        }
    }
}

/// Fields recovered from a single chunk.
///
/// Anything the model could not find is simply absent; an absent field is
/// not the same as an empty string or empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecord {
    values: IndexMap<String, FieldValue>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any earlier one.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Decode a structured-output JSON object against `schema`.
    ///
    /// Null values become absent fields. A field outside the schema or a
    /// value of the wrong shape is a [`PipelineError::SchemaViolation`].
    pub fn from_response(value: &Value, schema: &Schema) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| PipelineError::SchemaViolation {
                field: String::new(),
                reason: "response is not a JSON object".into(),
            })?;

        for field in object.keys() {
            if schema.get(field).is_none() {
                return Err(PipelineError::SchemaViolation {
                    field: field.clone(),
                    reason: format!("not part of schema `{}`", schema.name()),
                });
            }
        }

        // Walk the schema rather than the object so the record keeps schema
        // field order.
        let mut record = PartialRecord::new();
        for spec in schema.fields() {
            let Some(raw) = object.get(&spec.name) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }
            let value =
                FieldValue::from_json(raw, spec.kind).ok_or_else(|| {
                    PipelineError::SchemaViolation {
                        field: spec.name.clone(),
                        reason: format!("expected {}, got `{raw}`", spec.kind.describe()),
                    }
                })?;
            record.set(spec.name.clone(), value);
        }
        Ok(record)
    }
}

/// Finalized record for one entity, produced by the merger.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    values: IndexMap<String, FieldValue>,
}

impl MergedRecord {
    pub(crate) fn from_values(values: IndexMap<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Replace one field, consuming the record.
    ///
    /// For values the driver knows out-of-band, such as the canonical
    /// product link reported by the scraper.
    pub fn with_value(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.values.insert(field.into(), value);
        self
    }
}
