//! Combines partial records into one merged record.

use indexmap::IndexMap;

use crate::error::{PipelineError, Result};
use crate::record::{FieldValue, MergedRecord, PartialRecord};
use crate::schema::Schema;

/// Merge partial records in sequence order.
///
/// For every schema field the last non-absent value wins; an absent value
/// never erases an earlier one. This is a strict left-to-right fold with
/// skip-absent semantics, not a union, and list values replace wholesale
/// rather than concatenating.
///
/// An empty input produces an all-absent record. A record carrying a field
/// outside the schema, or a value of the wrong shape, fails with
/// [`PipelineError::SchemaViolation`].
pub fn merge(records: &[PartialRecord], schema: &Schema) -> Result<MergedRecord> {
    let mut values: IndexMap<String, FieldValue> = IndexMap::new();

    for record in records {
        for (field, value) in record.iter() {
            let spec = schema
                .get(field)
                .ok_or_else(|| PipelineError::SchemaViolation {
                    field: field.clone(),
                    reason: format!("not part of schema `{}`", schema.name()),
                })?;
            if !value.matches(spec.kind) {
                return Err(PipelineError::SchemaViolation {
                    field: field.clone(),
                    reason: format!(
                        "expected {}, got {}",
                        spec.kind.describe(),
                        value.describe()
                    ),
                });
            }
            values.insert(field.clone(), value.clone());
        }
    }

    // Reorder to schema declaration order for stable downstream output.
    let mut ordered = IndexMap::with_capacity(values.len());
    for spec in schema.fields() {
        if let Some(value) = values.swap_remove(&spec.name) {
            ordered.insert(spec.name.clone(), value);
        }
    }

    Ok(MergedRecord::from_values(ordered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    fn schema() -> Schema {
        Schema::new("widget")
            .field(FieldSpec::new("a", FieldKind::Integer))
            .field(FieldSpec::new("b", FieldKind::Text))
            .field(FieldSpec::new("tags", FieldKind::TextList))
    }

    fn int(n: i64) -> FieldValue {
        FieldValue::Integer(n)
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.into())
    }

    #[test]
    fn empty_input_yields_all_absent_record() {
        let merged = merge(&[], &schema()).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn absent_never_overwrites_present() {
        let records = [
            PartialRecord::new().with("a", int(1)),
            PartialRecord::new(), // `a` absent here
        ];
        let merged = merge(&records, &schema()).unwrap();
        assert_eq!(merged.get("a"), Some(&int(1)));
    }

    #[test]
    fn last_non_absent_wins() {
        let records = [
            PartialRecord::new().with("a", int(1)),
            PartialRecord::new().with("a", int(2)),
        ];
        let merged = merge(&records, &schema()).unwrap();
        assert_eq!(merged.get("a"), Some(&int(2)));
    }

    #[test]
    fn fields_merge_independently() {
        let records = [
            PartialRecord::new().with("a", int(1)).with("b", text("x")),
            PartialRecord::new().with("b", text("y")),
        ];
        let merged = merge(&records, &schema()).unwrap();
        assert_eq!(merged.get("a"), Some(&int(1)));
        assert_eq!(merged.get("b"), Some(&text("y")));
    }

    #[test]
    fn lists_replace_wholesale() {
        let records = [
            PartialRecord::new().with(
                "tags",
                FieldValue::TextList(vec!["one".into(), "two".into()]),
            ),
            PartialRecord::new().with("tags", FieldValue::TextList(vec!["three".into()])),
        ];
        let merged = merge(&records, &schema()).unwrap();
        assert_eq!(
            merged.get("tags"),
            Some(&FieldValue::TextList(vec!["three".into()]))
        );
    }

    #[test]
    fn unknown_field_is_a_schema_violation() {
        let records = [PartialRecord::new().with("zzz", int(1))];
        let err = merge(&records, &schema()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SchemaViolation { ref field, .. } if field == "zzz"
        ));
    }

    #[test]
    fn ill_typed_value_is_a_schema_violation() {
        let records = [PartialRecord::new().with("a", text("not a number"))];
        let err = merge(&records, &schema()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SchemaViolation { ref field, .. } if field == "a"
        ));
    }

    #[test]
    fn output_follows_schema_field_order() {
        let records = [PartialRecord::new().with("b", text("x")).with("a", int(1))];
        let merged = merge(&records, &schema()).unwrap();
        let fields: Vec<&str> = merged.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(fields, ["a", "b"]);
    }

    #[test]
    fn merging_twice_gives_the_same_record() {
        let records = [
            PartialRecord::new().with("a", int(1)).with("b", text("x")),
            PartialRecord::new().with("a", int(2)),
        ];
        assert_eq!(
            merge(&records, &schema()).unwrap(),
            merge(&records, &schema()).unwrap()
        );
    }
}
