//! Instruction text for extraction calls.

use crate::schema::Schema;

/// System message for structured extraction calls.
pub const EXTRACT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant designed to output structured data.";

/// Build the user instruction for one chunk.
///
/// The brand normalization lives here, in the instruction text, so the
/// model writes the current brand name directly instead of a post-processing
/// step rewriting values.
pub fn extraction_prompt(chunk: &str, schema: &Schema) -> String {
    let mut prompt = format!(
        "Extract the {} data from the following text and structure it \
         according to the provided schema.\n\n\
         Special Instructions:\n\
         - Emerson Climate Technologies is now called Copeland. \
         Please use the new brand name.\n\
         - Leave any field that the text does not mention as null.\n",
        schema.name()
    );

    let hints: Vec<String> = schema
        .fields()
        .filter_map(|spec| {
            spec.hint
                .as_ref()
                .map(|hint| format!("    - {}: {hint}", spec.name))
        })
        .collect();
    if !hints.is_empty() {
        prompt.push_str("\nField notes:\n");
        prompt.push_str(&hints.join("\n"));
        prompt.push('\n');
    }

    prompt.push_str("\nText:\n");
    prompt.push_str(chunk);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    #[test]
    fn prompt_carries_chunk_schema_name_and_brand_rule() {
        let schema = Schema::new("compressor")
            .field(FieldSpec::new("brand", FieldKind::Text).with_hint("Brand name, e.g. Copeland"));

        let prompt = extraction_prompt("Model XP-3 weighs 40 lb", &schema);

        assert!(prompt.contains("Extract the compressor data"));
        assert!(prompt.contains("Copeland"));
        assert!(prompt.contains("Model XP-3 weighs 40 lb"));
        assert!(prompt.contains("brand: Brand name, e.g. Copeland"));
    }

    #[test]
    fn no_field_notes_section_without_hints() {
        let schema = Schema::new("compressor").field(FieldSpec::new("brand", FieldKind::Text));
        let prompt = extraction_prompt("text", &schema);
        assert!(!prompt.contains("Field notes"));
    }
}
