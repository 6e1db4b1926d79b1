//! Name-to-schema resolution.
//!
//! Schemas are registered under their own name at startup and looked up by
//! exact key. This replaces dynamic, reflection-style schema loading: a miss
//! is an [`PipelineError::InvalidConfiguration`], not a panic at call time.

use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::schema::Schema;

/// Registry mapping schema names to definitions.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own name, replacing any earlier one.
    pub fn register(&mut self, schema: Schema) {
        self.schemas.insert(schema.name().to_string(), schema);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, schema: Schema) -> Self {
        self.register(schema);
        self
    }

    /// Resolve a schema by exact name.
    pub fn resolve(&self, name: &str) -> Result<&Schema> {
        self.schemas
            .get(name)
            .ok_or_else(|| PipelineError::InvalidConfiguration {
                reason: format!("unknown schema `{name}`"),
            })
    }

    /// Registered names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    #[test]
    fn resolves_registered_schema() {
        let registry = SchemaRegistry::new()
            .with(Schema::new("compressor").field(FieldSpec::new("brand", FieldKind::Text)));

        let schema = registry.resolve("compressor").unwrap();
        assert_eq!(schema.name(), "compressor");
    }

    #[test]
    fn miss_is_a_configuration_error() {
        let registry = SchemaRegistry::new();
        let err = registry.resolve("condenser").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("condenser"));
    }

    #[test]
    fn names_are_sorted() {
        let registry = SchemaRegistry::new()
            .with(Schema::new("b"))
            .with(Schema::new("a"));
        assert_eq!(registry.names(), ["a", "b"]);
    }
}
