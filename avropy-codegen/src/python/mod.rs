//! Python code generation modules.

pub mod endpoints;
pub mod enums;
pub mod records;

pub use endpoints::{EndpointGenerator, EndpointSignature, build_endpoint_table};
pub use enums::EnumClassGenerator;
pub use records::RecordGenerator;

use avropy_schema::TypeDefinition;

use crate::error::CodegenError;

/// Four-space indentation unit of the generated Python.
pub(crate) const INDENT: &str = "    ";

/// Column width for wrapped docstrings and slot lists.
pub(crate) const FILL_WIDTH: usize = 70;

/// Appends one line at the given indent level.
pub(crate) fn push_line(output: &mut String, indent_level: usize, text: &str) {
    for _ in 0..indent_level {
        output.push_str(INDENT);
    }
    output.push_str(text);
    output.push('\n');
}

/// Greedy word-wrap with every line prefixed by the indent.
///
/// Returns an empty string when the text holds no words, matching the
/// behavior expected for blank documentation.
pub(crate) fn fill(text: &str, indent_level: usize, width: usize) -> String {
    let indent = INDENT.repeat(indent_level);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = format!("{indent}{word}");
        } else if current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
            current = format!("{indent}{word}");
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Generates the class definition for one type.
///
/// # Errors
/// Returns `CodegenError` if field analysis or embedded-type resolution
/// fails for the definition.
pub fn generate_class(def: &TypeDefinition) -> Result<String, CodegenError> {
    if def.is_enum() {
        Ok(EnumClassGenerator::new(def).generate())
    } else {
        RecordGenerator::new(def).generate()
    }
}
