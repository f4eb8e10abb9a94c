//! Field analysis and embedded-type resolution.
//!
//! Field enumeration is sorted by name everywhere so the emitted code is
//! diff-stable across regenerations regardless of declaration order in
//! the source schemas. Enum symbols are the one exception; their order is
//! semantically meaningful and preserved.

use std::collections::BTreeMap;

use avropy_schema::{Field, TypeDefinition, TypeDescriptor};

use crate::error::CodegenError;

/// The pagination token field every search response must carry.
pub const NEXT_PAGE_TOKEN: &str = "next_page_token";

/// Returns the fields sorted lexicographically by name.
#[must_use]
pub fn sorted_fields(fields: &[Field]) -> Vec<&Field> {
    let mut sorted: Vec<&Field> = fields.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Returns the names of fields without a declared default, sorted.
#[must_use]
pub fn required_fields(fields: &[Field]) -> Vec<&str> {
    sorted_fields(fields)
        .into_iter()
        .filter(|field| !field.has_default())
        .map(|field| field.name.as_str())
        .collect()
}

/// Returns the name of the value-list field of a search response.
///
/// A search response has exactly two fields: `next_page_token` and the
/// list holding one page of values.
///
/// # Errors
/// Returns `CodegenError::ResponseShape` if the field set is not exactly
/// `{next_page_token, X}`.
pub fn value_list_name(type_name: &str, fields: &[Field]) -> Result<String, CodegenError> {
    let names: Vec<&str> = sorted_fields(fields)
        .into_iter()
        .map(|field| field.name.as_str())
        .collect();
    let remaining: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| *name != NEXT_PAGE_TOKEN)
        .collect();

    if remaining.len() == names.len() || remaining.len() != 1 {
        return Err(CodegenError::ResponseShape {
            type_name: type_name.to_string(),
            fields: names.join(", "),
        });
    }
    Ok(remaining[0].to_string())
}

/// Embedded-type edges of one record definition.
///
/// An edge relates a field to the record type it references directly,
/// inside an array, or inside a nullable union. The table is built once
/// per definition during generation; edges iterate sorted by field name.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedTypes {
    edges: BTreeMap<String, String>,
}

impl EmbeddedTypes {
    /// Resolves the embedded-type edges of a definition.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedUnion` if a field carries a
    /// union that is not the two-branch null-first shape, or a nullable
    /// wrapper around a nested composite type.
    pub fn resolve(def: &TypeDefinition) -> Result<Self, CodegenError> {
        let mut edges = BTreeMap::new();
        for field in sorted_fields(def.fields()) {
            if let Some(target) = embedded_target(&def.name, field)? {
                edges.insert(field.name.clone(), target.to_string());
            }
        }
        Ok(Self { edges })
    }

    /// Returns true if the field references an embedded record type.
    #[must_use]
    pub fn is_embedded_type(&self, field_name: &str) -> bool {
        self.edges.contains_key(field_name)
    }

    /// Returns the record type referenced by the field, if any.
    #[must_use]
    pub fn get_embedded_type(&self, field_name: &str) -> Option<&str> {
        self.edges.get(field_name).map(String::as_str)
    }

    /// Returns true if the record references no embedded types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates the edges sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|(field, target)| (field.as_str(), target.as_str()))
    }
}

/// Classifies one field's descriptor into an optional embedded edge.
fn embedded_target<'a>(
    type_name: &str,
    field: &'a Field,
) -> Result<Option<&'a str>, CodegenError> {
    match &field.descriptor {
        TypeDescriptor::Primitive(_) | TypeDescriptor::Enum(_) | TypeDescriptor::Map(_) => {
            Ok(None)
        }
        TypeDescriptor::Record(name) => Ok(Some(name.as_str())),
        TypeDescriptor::Array(element) => Ok(element.referenced_record()),
        TypeDescriptor::Union(branches) => resolve_union(type_name, field, branches),
    }
}

/// Applies the nullable-union convention to a union descriptor.
///
/// The only supported union shape is two branches with the null marker
/// first. A record second branch yields an edge; a scalar second branch
/// (primitive or enum reference) is a plain nullable field. A composite
/// second branch is rejected rather than silently skipped.
fn resolve_union<'a>(
    type_name: &str,
    field: &Field,
    branches: &'a [TypeDescriptor],
) -> Result<Option<&'a str>, CodegenError> {
    let [first, second] = branches else {
        return Err(CodegenError::unsupported_union(
            type_name,
            &field.name,
            format!("expected exactly 2 branches, found {}", branches.len()),
        ));
    };
    if !first.is_null() {
        return Err(CodegenError::unsupported_union(
            type_name,
            &field.name,
            "first branch must be the null marker",
        ));
    }
    match second {
        TypeDescriptor::Record(name) => Ok(Some(name.as_str())),
        TypeDescriptor::Primitive(_) | TypeDescriptor::Enum(_) => Ok(None),
        other => Err(CodegenError::unsupported_union(
            type_name,
            &field.name,
            format!("nullable {} branches are not supported", other.variant_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avropy_schema::parse_definition;

    fn variant_def() -> TypeDefinition {
        let source = r#"{
            "type": "record",
            "name": "Variant",
            "fields": [
                {"name": "names", "type": {"type": "array", "items": "string"}, "default": []},
                {"name": "id", "type": "string"},
                {"name": "calls", "type": {"type": "array", "items": {
                    "type": "record", "name": "Call", "fields": [
                        {"name": "call_set_id", "type": "string"}
                    ]}}, "default": []},
                {"name": "created", "type": "long"}
            ]
        }"#;
        parse_definition(source).expect("Failed to parse")
    }

    #[test]
    fn test_sorted_fields_ignores_declaration_order() {
        let def = variant_def();
        let names: Vec<&str> = sorted_fields(def.fields())
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        assert_eq!(names, ["calls", "created", "id", "names"]);
    }

    #[test]
    fn test_required_fields() {
        let def = variant_def();
        assert_eq!(required_fields(def.fields()), ["created", "id"]);
    }

    #[test]
    fn test_required_fields_all_defaulted() {
        let source = r#"{
            "type": "record",
            "name": "Empty",
            "fields": [{"name": "x", "type": ["null", "string"], "default": null}]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        assert!(required_fields(def.fields()).is_empty());
    }

    #[test]
    fn test_value_list_name() {
        let source = r#"{
            "type": "record",
            "name": "SearchVariantsResponse",
            "fields": [
                {"name": "variants", "type": {"type": "array", "items": "string"}, "default": []},
                {"name": "next_page_token", "type": ["null", "string"], "default": null}
            ]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let name = value_list_name(&def.name, def.fields()).expect("Failed to extract");
        assert_eq!(name, "variants");
    }

    #[test]
    fn test_value_list_name_missing_token() {
        let source = r#"{
            "type": "record",
            "name": "SearchVariantsResponse",
            "fields": [{"name": "variants", "type": "string"}]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let err = value_list_name(&def.name, def.fields()).unwrap_err();
        assert!(matches!(err, CodegenError::ResponseShape { .. }));
    }

    #[test]
    fn test_value_list_name_extra_field() {
        let source = r#"{
            "type": "record",
            "name": "SearchVariantsResponse",
            "fields": [
                {"name": "variants", "type": "string"},
                {"name": "extra", "type": "string"},
                {"name": "next_page_token", "type": ["null", "string"], "default": null}
            ]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let err = value_list_name(&def.name, def.fields()).unwrap_err();
        assert!(matches!(err, CodegenError::ResponseShape { .. }));
    }

    #[test]
    fn test_embedded_types_direct_array_and_union() {
        let source = r#"{
            "type": "record",
            "name": "Call",
            "fields": [
                {"name": "info", "type": {"type": "map", "values": "string"}, "default": {}},
                {"name": "position", "type": {
                    "type": "record", "name": "Position", "fields": [
                        {"name": "base", "type": "long"}
                    ]}},
                {"name": "mate", "type": ["null", "Position"], "default": null},
                {"name": "children", "type": {"type": "array", "items": "Position"}, "default": []},
                {"name": "name", "type": ["null", "string"], "default": null}
            ]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let embedded = EmbeddedTypes::resolve(&def).expect("Failed to resolve");

        assert!(embedded.is_embedded_type("position"));
        assert!(embedded.is_embedded_type("mate"));
        assert!(embedded.is_embedded_type("children"));
        assert!(!embedded.is_embedded_type("info"));
        assert!(!embedded.is_embedded_type("name"));
        assert_eq!(embedded.get_embedded_type("mate"), Some("Position"));
        assert_eq!(embedded.get_embedded_type("name"), None);

        let edges: Vec<(&str, &str)> = embedded.iter().collect();
        assert_eq!(
            edges,
            [
                ("children", "Position"),
                ("mate", "Position"),
                ("position", "Position"),
            ]
        );
    }

    #[test]
    fn test_union_not_null_first_rejected() {
        let source = r#"{
            "type": "record",
            "name": "Bad",
            "fields": [{"name": "x", "type": ["string", "null"]}]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let err = EmbeddedTypes::resolve(&def).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedUnion { .. }));
    }

    #[test]
    fn test_union_three_branches_rejected() {
        let source = r#"{
            "type": "record",
            "name": "Bad",
            "fields": [{"name": "x", "type": ["null", "string", "long"]}]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let err = EmbeddedTypes::resolve(&def).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedUnion { .. }));
    }

    #[test]
    fn test_union_nullable_array_of_records_rejected() {
        let source = r#"{
            "type": "record",
            "name": "Variant",
            "fields": [
                {"name": "calls", "type": ["null", {"type": "array", "items": {
                    "type": "record", "name": "Call", "fields": [
                        {"name": "id", "type": "string"}
                    ]}}], "default": null}
            ]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let err = EmbeddedTypes::resolve(&def).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedUnion { .. }));
    }

    #[test]
    fn test_enum_reference_has_no_edge() {
        let source = r#"{
            "type": "record",
            "name": "Position",
            "fields": [
                {"name": "strand", "type": {"type": "enum", "name": "Strand",
                    "symbols": ["NEG_STRAND", "POS_STRAND"]}}
            ]
        }"#;
        let def = parse_definition(source).expect("Failed to parse");
        let embedded = EmbeddedTypes::resolve(&def).expect("Failed to resolve");
        assert!(embedded.is_empty());
    }
}
