//! Record class generation.
//!
//! Emits one Python class per record definition: the documentation, the
//! embedded schema source, the required-field set, the embedded-type
//! lookup table, and a closed-slot constructor assigning declared
//! defaults.

use avropy_schema::{Field, TypeDefinition};
use serde_json::Value;

use crate::analysis::{EmbeddedTypes, required_fields, sorted_fields, value_list_name};
use crate::classify::{Classification, classify};
use crate::error::CodegenError;
use crate::python::{FILL_WIDTH, fill, push_line};

/// Generator for record class definitions.
pub struct RecordGenerator<'a> {
    def: &'a TypeDefinition,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(def: &'a TypeDefinition) -> Self {
        Self { def }
    }

    /// Generates the class definition.
    ///
    /// # Errors
    /// Returns `CodegenError` if embedded-type resolution fails or, for
    /// search responses, the value-list field cannot be determined.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let classification = classify(self.def);
        let fields = sorted_fields(self.def.fields());
        let embedded = EmbeddedTypes::resolve(self.def)?;
        let mut output = String::new();

        push_line(
            &mut output,
            0,
            &format!("class {}({}):", self.def.name, classification.superclass()),
        );
        push_docstring(&mut output, self.def.doc.as_deref());

        push_line(&mut output, 1, "_schemaSource = \"\"\"");
        output.push_str(&avropy_schema::compact_source(&self.def.source)?);
        output.push_str("\"\"\"\n");
        push_line(&mut output, 1, "schema = avro.schema.parse(_schemaSource)");
        self.push_required_fields(&mut output);
        if classification == Classification::SearchResponse {
            let value_list = value_list_name(&self.def.name, self.def.fields())?;
            push_line(&mut output, 1, &format!("_valueListName = \"{value_list}\""));
        }
        output.push('\n');
        push_embedded_types(&mut output, &embedded);
        output.push('\n');
        push_constructor(&mut output, &fields);

        Ok(output)
    }

    /// Emits the `requiredFields` literal set.
    fn push_required_fields(&self, output: &mut String) {
        let required = required_fields(self.def.fields());
        if required.is_empty() {
            push_line(output, 1, "requiredFields = set([])");
        } else {
            push_line(output, 1, "requiredFields = set([");
            for name in required {
                push_line(output, 2, &format!("\"{name}\","));
            }
            push_line(output, 1, "])");
        }
    }
}

/// Emits the class docstring, falling back to a fixed marker.
pub(crate) fn push_docstring(output: &mut String, doc: Option<&str>) {
    let doc = match doc {
        Some(text) if !text.trim().is_empty() => text,
        _ => "No documentation",
    };
    push_line(output, 1, "\"\"\"");
    output.push_str(&fill(doc, 1, FILL_WIDTH));
    output.push('\n');
    push_line(output, 1, "\"\"\"");
}

/// Emits the embedded-type table and its lookup classmethods.
fn push_embedded_types(output: &mut String, embedded: &EmbeddedTypes) {
    if embedded.is_empty() {
        push_line(output, 1, "_embeddedTypes = {}");
    } else {
        push_line(output, 1, "_embeddedTypes = {");
        for (field, target) in embedded.iter() {
            push_line(output, 2, &format!("'{field}': {target},"));
        }
        push_line(output, 1, "}");
    }
    output.push('\n');
    push_line(output, 1, "@classmethod");
    push_line(output, 1, "def isEmbeddedType(cls, fieldName):");
    push_line(output, 2, "return fieldName in cls._embeddedTypes");
    output.push('\n');
    push_line(output, 1, "@classmethod");
    push_line(output, 1, "def getEmbeddedType(cls, fieldName):");
    push_line(output, 2, "return cls._embeddedTypes[fieldName]");
}

/// Emits the slot declaration and zero-argument constructor.
///
/// Slots close the attribute set to exactly the field names; the
/// constructor assigns every field its declared default in sorted order.
fn push_constructor(output: &mut String, fields: &[&Field]) {
    if fields.is_empty() {
        push_line(output, 1, "__slots__ = []");
        output.push('\n');
        push_line(output, 1, "def __init__(self):");
        push_line(output, 2, "pass");
        return;
    }

    let slots: Vec<String> = fields
        .iter()
        .map(|field| format!("'{}'", field.name))
        .collect();
    push_line(output, 1, "__slots__ = [");
    output.push_str(&fill(&slots.join(", "), 2, FILL_WIDTH));
    output.push('\n');
    push_line(output, 1, "]");
    output.push('\n');
    push_line(output, 1, "def __init__(self):");
    for field in fields {
        let default = field
            .default
            .as_ref()
            .map_or_else(|| "None".to_string(), python_literal);
        push_line(output, 2, &format!("self.{} = {}", field.name, default));
    }
}

/// Renders a JSON default value as a Python literal.
fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => python_str(text),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", python_str(key), python_literal(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

/// Renders a single-quoted Python string literal.
fn python_str(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 2);
    output.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '\'' => output.push_str("\\'"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            _ => output.push(ch),
        }
    }
    output.push('\'');
    output
}
