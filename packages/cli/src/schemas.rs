//! Built-in extraction schemas and their spreadsheet column mappings.

use pipeline::{ColumnMapping, FieldKind, FieldSpec, Schema, SchemaRegistry};

/// Registry of the schemas this binary knows how to extract.
pub fn builtin_registry() -> SchemaRegistry {
    SchemaRegistry::new().with(compressor())
}

/// Display columns for a registered schema name.
pub fn display_columns(schema: &str) -> Option<ColumnMapping> {
    match schema {
        "compressor" => Some(compressor_columns()),
        _ => None,
    }
}

/// Field contract for HVAC compressor parts.
fn compressor() -> Schema {
    Schema::new("compressor")
        // Product information
        .field(FieldSpec::new("product_name", FieldKind::Text))
        .field(FieldSpec::new("compressor_type", FieldKind::Text).with_hint(
            "Type of compressor, e.g., Reciprocating, Hermetic, Single Phase, \
             Three Phase, Two Stage Single Phase, etc.",
        ))
        .field(FieldSpec::new("brand", FieldKind::Text).with_hint("Brand name, e.g. Copeland"))
        .field(FieldSpec::new("model_no", FieldKind::Text))
        .field(FieldSpec::new("description", FieldKind::Text))
        .field(FieldSpec::new("link", FieldKind::Text))
        .field(FieldSpec::new("used_in", FieldKind::TextList).with_hint(
            "Model numbers of complete HVAC products this part is used in, \
             e.g. WJA436000K000K",
        ))
        .field(FieldSpec::new("price", FieldKind::Text))
        // Dimensions
        .field(FieldSpec::new("length_in", FieldKind::Number))
        .field(FieldSpec::new("width_in", FieldKind::Number))
        .field(FieldSpec::new("height_in", FieldKind::Number))
        .field(FieldSpec::new("weight_lb", FieldKind::Number))
        // Electrical and performance
        .field(FieldSpec::new("amps", FieldKind::Number))
        .field(FieldSpec::new("rated_load_amps", FieldKind::NumberList))
        .field(FieldSpec::new("voltage", FieldKind::Text))
        .field(FieldSpec::new("phase", FieldKind::Text))
        .field(FieldSpec::new("lower_rpm", FieldKind::Integer))
        .field(FieldSpec::new("upper_rpm", FieldKind::Integer))
        .field(FieldSpec::new("cycle_hertz", FieldKind::IntegerList))
        .field(FieldSpec::new("tonnage", FieldKind::Number))
        // Refrigerant and cooling
        .field(FieldSpec::new("refrigerant", FieldKind::Text))
        .field(FieldSpec::new("oil_type", FieldKind::Text))
        // Additional details
        .field(FieldSpec::new("displacement_unit", FieldKind::Text))
        .field(FieldSpec::new("displacement", FieldKind::Number))
        .field(FieldSpec::new("suction_line_size", FieldKind::Text))
        .field(FieldSpec::new("discharge_connection_size", FieldKind::Text))
        .field(FieldSpec::new("country_of_origin", FieldKind::Text))
        .field(FieldSpec::new("upc", FieldKind::Text))
}

/// Spreadsheet columns for the compressor schema, in output order.
fn compressor_columns() -> ColumnMapping {
    ColumnMapping::new()
        .column("Product Name", "product_name")
        .column("Type", "compressor_type")
        .column("Length [in]", "length_in")
        .column("Width [in]", "width_in")
        .column("Height [in]", "height_in")
        .column("Price", "price")
        .column("Weight [lb]", "weight_lb")
        .column("Manufacturer", "brand")
        .column("Model No", "model_no")
        .column("Tonnage", "tonnage")
        .column("Displacement Unit", "displacement_unit")
        .column("Displacement", "displacement")
        .column("Lower RPM", "lower_rpm")
        .column("Upper RPM", "upper_rpm")
        .column("Cycle [Hz]", "cycle_hertz")
        .column("Refrigerant", "refrigerant")
        .column("Description", "description")
        .column("Link", "link")
        .column("Used In", "used_in")
}
