//! # avropy
//!
//! Avro schema to Python protocol-class compiler.
//!
//! avropy turns a directory of Avro JSON schema definitions (`.avsc`
//! files, one named record or enum each) into a single generated Python
//! source file of protocol classes, plus a derived routing table pairing
//! paginated search request/response types with their endpoint paths.
//!
//! ## Features
//!
//! - **Deterministic emission** - Types and record fields are emitted in
//!   sorted order; identical inputs yield byte-identical artifacts
//! - **Paginated search convention** - `Search<X>Request` /
//!   `Search<X>Response` pairs are classified, validated, and mapped to
//!   `/<x>/search` endpoints
//! - **Embedded-type resolution** - Field references to other record
//!   types become static lookup tables in the generated classes
//! - **Atomic publication** - The artifact is staged and renamed into
//!   place only on success
//!
//! ## Quick Start
//!
//! ```ignore
//! use avropy::prelude::*;
//!
//! let source = LocalDirSource::new("schemas/");
//! avropy::codegen::pipeline::run(&source, "v0.5.1", "out/_protocol_definitions.py".as_ref())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Avro JSON schema parsing and type descriptors
//! - [`codegen`] - Classification, analysis, Python emission, and the
//!   generation orchestrator

pub mod prelude;

/// Schema parsing and type definitions.
pub mod schema {
    pub use avropy_schema::*;
}

/// Code generation from Avro schemas.
pub mod codegen {
    pub use avropy_codegen::*;
}

// Re-export commonly used items at the crate root
pub use avropy_codegen::{
    Classification, CodegenError, Generator, LocalDirSource, SchemaSource, Staging, classify,
    generate_from_dir,
};
pub use avropy_schema::{Field, ParseError, TypeDefinition, TypeDescriptor, TypeKind};
