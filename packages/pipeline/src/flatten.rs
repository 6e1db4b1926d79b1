//! Flattening merged records into sink rows.
//!
//! Sinks receive a mapping from display column name to cell string; the
//! pipeline owns no file format.

use indexmap::IndexMap;

use crate::record::MergedRecord;

/// Ordered mapping from display column name to schema field name.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: IndexMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Column order is output order.
    pub fn column(mut self, display: impl Into<String>, field: impl Into<String>) -> Self {
        self.columns.insert(display.into(), field.into());
        self
    }

    /// Display names in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// `(display name, field name)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(d, f)| (d.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Render a merged record as one sink row.
///
/// Fields the record has no value for map to empty cells; schema fields not
/// named by the mapping are dropped. List values are joined with `", "`.
pub fn flatten_record(record: &MergedRecord, mapping: &ColumnMapping) -> IndexMap<String, String> {
    mapping
        .iter()
        .map(|(display, field)| {
            let cell = record
                .get(field)
                .map(|value| value.to_cell())
                .unwrap_or_default();
            (display.to_string(), cell)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merger::merge;
    use crate::record::{FieldValue, PartialRecord};
    use crate::schema::{FieldKind, FieldSpec, Schema};

    fn merged() -> MergedRecord {
        let schema = Schema::new("widget")
            .field(FieldSpec::new("name", FieldKind::Text))
            .field(FieldSpec::new("weight_lb", FieldKind::Number))
            .field(FieldSpec::new("used_in", FieldKind::TextList))
            .field(FieldSpec::new("internal", FieldKind::Text));

        let partial = PartialRecord::new()
            .with("name", FieldValue::Text("X-200".into()))
            .with(
                "used_in",
                FieldValue::TextList(vec!["A1".into(), "B2".into()]),
            )
            .with("internal", FieldValue::Text("hidden".into()));

        merge(&[partial], &schema).unwrap()
    }

    fn mapping() -> ColumnMapping {
        ColumnMapping::new()
            .column("Product Name", "name")
            .column("Weight [lb]", "weight_lb")
            .column("Used In", "used_in")
    }

    #[test]
    fn row_follows_column_order() {
        let row = flatten_record(&merged(), &mapping());
        let headers: Vec<&String> = row.keys().collect();
        assert_eq!(headers, ["Product Name", "Weight [lb]", "Used In"]);
    }

    #[test]
    fn absent_fields_become_empty_cells() {
        let row = flatten_record(&merged(), &mapping());
        assert_eq!(row["Weight [lb]"], "");
    }

    #[test]
    fn lists_are_joined() {
        let row = flatten_record(&merged(), &mapping());
        assert_eq!(row["Used In"], "A1, B2");
    }

    #[test]
    fn unmapped_fields_are_dropped() {
        let row = flatten_record(&merged(), &mapping());
        assert!(!row.values().any(|cell| cell == "hidden"));
    }
}
