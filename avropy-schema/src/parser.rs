//! Avro JSON schema parser.
//!
//! This module parses one `.avsc` source (a single named record or enum
//! definition) into the internal type representation. Inline named
//! definitions encountered in field position are registered so that later
//! bare-string references in the same file resolve to the right
//! descriptor variant.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::types::{Field, TypeDefinition, TypeDescriptor, TypeKind, is_primitive_name};

/// Kind of a named type seen inline in the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedKind {
    Record,
    Enum,
    Fixed,
}

/// Parses a single Avro type definition from its JSON source.
///
/// # Arguments
/// * `source` - Schema source text (one record or enum definition)
///
/// # Returns
/// Parsed type definition or parse error.
///
/// # Errors
/// Returns `ParseError` if the source is not valid JSON, is not a record
/// or enum definition, or declares duplicate field names or symbols.
pub fn parse_definition(source: &str) -> Result<TypeDefinition, ParseError> {
    let value: Value = serde_json::from_str(source)?;
    let root = value
        .as_object()
        .ok_or_else(|| ParseError::invalid_structure("top-level schema must be a JSON object"))?;

    let kind = require_str(root, "schema", "type")?;
    let name = require_str(root, kind, "name")?.to_string();
    let doc = root.get("doc").and_then(Value::as_str).map(str::to_string);

    let parsed_kind = match kind {
        "record" | "error" => {
            let mut parser = DescriptorParser::new();
            // Register the root name first so self-references resolve.
            parser.names.insert(name.clone(), NamedKind::Record);
            TypeKind::Record(parse_fields(&mut parser, root, &name)?)
        }
        "enum" => TypeKind::Enum(parse_symbols(root, &name)?),
        other => {
            return Err(ParseError::UnknownKind {
                name,
                kind: other.to_string(),
            });
        }
    };

    Ok(TypeDefinition {
        name,
        doc,
        kind: parsed_kind,
        source: value,
    })
}

/// Parses a single Avro type definition from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or its content cannot
/// be parsed.
pub fn parse_definition_file(path: &Path) -> Result<TypeDefinition, ParseError> {
    let source = std::fs::read_to_string(path)?;
    parse_definition(&source)
}

/// Parses the `fields` attribute of a record definition.
fn parse_fields(
    parser: &mut DescriptorParser,
    root: &Map<String, Value>,
    record_name: &str,
) -> Result<Vec<Field>, ParseError> {
    let entries = root
        .get("fields")
        .ok_or_else(|| ParseError::missing_attr(record_name, "fields"))?
        .as_array()
        .ok_or_else(|| ParseError::invalid_structure("'fields' must be a JSON array"))?;

    let mut fields = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for entry in entries {
        let field = parse_field(parser, entry)?;
        if !seen.insert(field.name.clone()) {
            return Err(ParseError::duplicate("field", &field.name));
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Parses one field entry.
fn parse_field(parser: &mut DescriptorParser, entry: &Value) -> Result<Field, ParseError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| ParseError::invalid_structure("field entries must be JSON objects"))?;
    let name = require_str(obj, "field", "name")?.to_string();
    let type_value = obj
        .get("type")
        .ok_or_else(|| ParseError::missing_attr(&name, "type"))?;
    let descriptor = parser.parse_descriptor(type_value, &name)?;

    Ok(Field {
        name,
        descriptor,
        default: obj.get("default").cloned(),
        doc: obj.get("doc").and_then(Value::as_str).map(str::to_string),
    })
}

/// Parses the `symbols` attribute of an enum definition.
fn parse_symbols(root: &Map<String, Value>, enum_name: &str) -> Result<Vec<String>, ParseError> {
    let entries = root
        .get("symbols")
        .ok_or_else(|| ParseError::missing_attr(enum_name, "symbols"))?
        .as_array()
        .ok_or_else(|| ParseError::invalid_structure("'symbols' must be a JSON array"))?;

    let mut symbols = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for entry in entries {
        let symbol = entry
            .as_str()
            .ok_or_else(|| {
                ParseError::invalid_attr(enum_name, "symbols", entry.to_string())
            })?
            .to_string();
        if !seen.insert(symbol.clone()) {
            return Err(ParseError::duplicate("symbol", &symbol));
        }
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Returns a required string attribute from a JSON object.
fn require_str<'a>(
    obj: &'a Map<String, Value>,
    element: &str,
    attribute: &str,
) -> Result<&'a str, ParseError> {
    let value = obj
        .get(attribute)
        .ok_or_else(|| ParseError::missing_attr(element, attribute))?;
    value
        .as_str()
        .ok_or_else(|| ParseError::invalid_attr(element, attribute, value.to_string()))
}

/// Descriptor parser tracking named types defined inline in the file.
struct DescriptorParser {
    names: HashMap<String, NamedKind>,
}

impl DescriptorParser {
    fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Parses one type descriptor from its JSON form.
    fn parse_descriptor(
        &mut self,
        value: &Value,
        field: &str,
    ) -> Result<TypeDescriptor, ParseError> {
        match value {
            Value::String(name) => Ok(self.named_reference(name)),
            Value::Array(branches) => {
                let branches = branches
                    .iter()
                    .map(|branch| self.parse_descriptor(branch, field))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::Union(branches))
            }
            Value::Object(obj) => self.parse_object_descriptor(obj, field),
            other => Err(ParseError::invalid_attr(field, "type", other.to_string())),
        }
    }

    /// Parses a descriptor given as a JSON object.
    fn parse_object_descriptor(
        &mut self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<TypeDescriptor, ParseError> {
        let kind = require_str(obj, field, "type")?;
        match kind {
            "array" => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| ParseError::missing_attr(field, "items"))?;
                let element = self.parse_descriptor(items, field)?;
                Ok(TypeDescriptor::Array(Box::new(element)))
            }
            "map" => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| ParseError::missing_attr(field, "values"))?;
                let value_type = self.parse_descriptor(values, field)?;
                Ok(TypeDescriptor::Map(Box::new(value_type)))
            }
            "record" | "error" => {
                let name = require_str(obj, kind, "name")?.to_string();
                self.names.insert(name.clone(), NamedKind::Record);
                // Walk the inline definition so nested named types are
                // registered before any later bare-string reference.
                if let Some(entries) = obj.get("fields").and_then(Value::as_array) {
                    for entry in entries {
                        if let Some(type_value) =
                            entry.as_object().and_then(|entry| entry.get("type"))
                        {
                            self.parse_descriptor(type_value, field)?;
                        }
                    }
                }
                Ok(TypeDescriptor::Record(name))
            }
            "enum" => {
                let name = require_str(obj, kind, "name")?.to_string();
                self.names.insert(name.clone(), NamedKind::Enum);
                Ok(TypeDescriptor::Enum(name))
            }
            "fixed" => {
                let name = require_str(obj, kind, "name")?.to_string();
                self.names.insert(name.clone(), NamedKind::Fixed);
                Ok(TypeDescriptor::Primitive(name))
            }
            other => Ok(self.named_reference(other)),
        }
    }

    /// Resolves a bare type name to a descriptor.
    ///
    /// Unknown names are record references; within a self-contained
    /// schema file every non-record named type appears inline before it
    /// is referenced by name.
    fn named_reference(&self, name: &str) -> TypeDescriptor {
        if is_primitive_name(name) {
            return TypeDescriptor::Primitive(name.to_string());
        }
        match self.names.get(name) {
            Some(NamedKind::Enum) => TypeDescriptor::Enum(name.to_string()),
            Some(NamedKind::Fixed) => TypeDescriptor::Primitive(name.to_string()),
            Some(NamedKind::Record) | None => TypeDescriptor::Record(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let source = r#"{
            "type": "record",
            "name": "SearchVariantsRequest",
            "doc": "A request for variants.",
            "fields": [
                {"name": "reference_name", "type": "string"},
                {"name": "page_token", "type": ["null", "string"], "default": null}
            ]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        assert_eq!(def.name, "SearchVariantsRequest");
        assert_eq!(def.doc.as_deref(), Some("A request for variants."));
        assert!(def.is_record());

        let fields = def.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "reference_name");
        assert!(!fields[0].has_default());
        assert!(fields[1].has_default());
        assert_eq!(
            fields[1].descriptor,
            TypeDescriptor::Union(vec![
                TypeDescriptor::Primitive("null".to_string()),
                TypeDescriptor::Primitive("string".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_enum() {
        let source = r#"{
            "type": "enum",
            "name": "Strand",
            "symbols": ["NEG_STRAND", "POS_STRAND"]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        assert!(def.is_enum());
        assert_eq!(def.symbols(), ["NEG_STRAND", "POS_STRAND"]);
        assert!(def.doc.is_none());
    }

    #[test]
    fn test_parse_inline_record_then_reference() {
        let source = r#"{
            "type": "record",
            "name": "Variant",
            "fields": [
                {"name": "calls", "type": {"type": "array", "items": {
                    "type": "record", "name": "Call", "fields": [
                        {"name": "genotype", "type": {"type": "array", "items": "int"}}
                    ]}}},
                {"name": "best_call", "type": "Call"}
            ]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        let fields = def.fields();
        assert_eq!(
            fields[0].descriptor,
            TypeDescriptor::Array(Box::new(TypeDescriptor::Record("Call".to_string())))
        );
        assert_eq!(
            fields[1].descriptor,
            TypeDescriptor::Record("Call".to_string())
        );
    }

    #[test]
    fn test_parse_inline_enum_reference_resolves_as_enum() {
        let source = r#"{
            "type": "record",
            "name": "Position",
            "fields": [
                {"name": "strand", "type": {"type": "enum", "name": "Strand",
                    "symbols": ["NEG_STRAND", "POS_STRAND"]}},
                {"name": "mate_strand", "type": "Strand"}
            ]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        let fields = def.fields();
        assert_eq!(
            fields[0].descriptor,
            TypeDescriptor::Enum("Strand".to_string())
        );
        assert_eq!(
            fields[1].descriptor,
            TypeDescriptor::Enum("Strand".to_string())
        );
    }

    #[test]
    fn test_parse_map_descriptor() {
        let source = r#"{
            "type": "record",
            "name": "CallSet",
            "fields": [
                {"name": "info", "type": {"type": "map", "values":
                    {"type": "array", "items": "string"}}, "default": {}}
            ]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        assert_eq!(
            def.fields()[0].descriptor,
            TypeDescriptor::Map(Box::new(TypeDescriptor::Array(Box::new(
                TypeDescriptor::Primitive("string".to_string())
            ))))
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_field() {
        let source = r#"{
            "type": "record",
            "name": "Bad",
            "fields": [
                {"name": "id", "type": "string"},
                {"name": "id", "type": "long"}
            ]
        }"#;

        let err = parse_definition(source).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let source = r#"{"type": "fixed", "name": "Md5", "size": 16}"#;
        let err = parse_definition(source).unwrap_err();
        assert!(matches!(err, ParseError::UnknownKind { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        let source = r#"{"type": "record", "fields": []}"#;
        let err = parse_definition(source).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_definition("not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_null_default_is_a_default() {
        let source = r#"{
            "type": "record",
            "name": "Paged",
            "fields": [
                {"name": "page_token", "type": ["null", "string"], "default": null}
            ]
        }"#;

        let def = parse_definition(source).expect("Failed to parse");
        assert!(def.fields()[0].has_default());
        assert_eq!(def.fields()[0].default, Some(Value::Null));
    }
}
