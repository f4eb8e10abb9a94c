//! Schema type definitions.
//!
//! This module contains the data structures representing one parsed Avro
//! type definition: records with named, typed fields and enums with an
//! ordered list of symbols.

use serde_json::Value;

/// Avro primitive type names.
pub const PRIMITIVE_NAMES: &[&str] = &[
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

/// Returns true if `name` is an Avro primitive type name.
#[must_use]
pub fn is_primitive_name(name: &str) -> bool {
    PRIMITIVE_NAMES.contains(&name)
}

/// Type descriptor for a field.
///
/// A closed, tagged representation of the Avro type forms that appear in
/// field position. Named references carry only the referenced name; the
/// referenced definition lives in its own schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Primitive type (`null`, `boolean`, `int`, `long`, `float`,
    /// `double`, `bytes`, `string`) or a named fixed type.
    Primitive(String),
    /// Array of an element type.
    Array(Box<TypeDescriptor>),
    /// Map from string keys to a value type.
    Map(Box<TypeDescriptor>),
    /// Reference to a named record type.
    Record(String),
    /// Reference to a named enum type.
    Enum(String),
    /// Union over an ordered list of branch types.
    Union(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Returns true if this is the `null` primitive marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(name) if name == "null")
    }

    /// Returns the referenced record name, if this is a record reference.
    #[must_use]
    pub fn referenced_record(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns a short label for the descriptor variant, used in errors.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Enum(_) => "enum",
            Self::Union(_) => "union",
        }
    }
}

/// Field within a record definition.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name (unique within its record).
    pub name: String,
    /// Declared type descriptor.
    pub descriptor: TypeDescriptor,
    /// Declared default value, if any. `Some(Value::Null)` is a declared
    /// `null` default, distinct from an absent default.
    pub default: Option<Value>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Field {
    /// Creates a new field with no default and no documentation.
    #[must_use]
    pub fn new(name: String, descriptor: TypeDescriptor) -> Self {
        Self {
            name,
            descriptor,
            default: None,
            doc: None,
        }
    }

    /// Returns true if the field declares a default value.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Kind of a type definition.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Record with fields in declaration order.
    Record(Vec<Field>),
    /// Enum with symbols in declaration order. Symbol order is
    /// semantically meaningful and is preserved.
    Enum(Vec<String>),
}

/// One parsed Avro type definition.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// Type name (unique across the input set).
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Record fields or enum symbols.
    pub kind: TypeKind,
    /// The parsed schema source, retained for literal embedding in the
    /// generated artifact.
    pub source: Value,
}

impl TypeDefinition {
    /// Returns true if this is a record definition.
    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record(_))
    }

    /// Returns true if this is an enum definition.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Returns the record fields, in declaration order. Empty for enums.
    ///
    /// Callers must not rely on declaration order; emission sorts fields
    /// by name.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            TypeKind::Record(fields) => fields,
            TypeKind::Enum(_) => &[],
        }
    }

    /// Returns the enum symbols, in declaration order. Empty for records.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        match &self.kind {
            TypeKind::Enum(symbols) => symbols,
            TypeKind::Record(_) => &[],
        }
    }
}
