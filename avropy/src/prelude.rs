//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use avropy::prelude::*;
//! ```

// Schema types
pub use avropy_schema::{
    Field, ParseError, TypeDefinition, TypeDescriptor, TypeKind, parse_definition,
    parse_definition_file,
};

// Codegen types
pub use avropy_codegen::{
    Classification, CodegenError, EndpointSignature, Generator, LocalDirSource, SchemaSource,
    Staging, build_endpoint_table, classify, generate_from_dir, search_object_name,
};

// Analysis operations
pub use avropy_codegen::analysis::{
    EmbeddedTypes, required_fields, sorted_fields, value_list_name,
};
