//! # avropy Codegen
//!
//! Python protocol-class generation from Avro schemas.
//!
//! This crate provides:
//! - Type classification for the paginated search convention
//! - Field analysis and embedded-type resolution
//! - Python class emission and endpoint table derivation
//! - A generation orchestrator with atomic artifact publication

pub mod analysis;
pub mod classify;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod python;

pub use classify::{Classification, classify, search_object_name};
pub use error::CodegenError;
pub use generator::Generator;
pub use pipeline::{LocalDirSource, SchemaSource, Staging};
pub use python::{EndpointSignature, build_endpoint_table};

/// Generates the protocol definitions artifact from a directory of
/// `.avsc` files.
///
/// # Arguments
/// * `version` - Target schema version identifier
/// * `schema_dir` - Directory containing one `.avsc` file per definition
///
/// # Returns
/// Generated Python source as a string.
///
/// # Errors
/// Returns `CodegenError` if collection, parsing, or generation fails.
pub fn generate_from_dir(
    version: &str,
    schema_dir: &std::path::Path,
) -> Result<String, CodegenError> {
    let generator = Generator::from_dir(version, schema_dir)?;
    generator.generate()
}
