//! Generation orchestrator.
//!
//! Collects type definitions, sorts them by name, drives class emission,
//! and publishes the generated artifact atomically.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use avropy_schema::{ParseError, TypeDefinition, parse_definition_file};

use crate::error::CodegenError;
use crate::python::{EndpointGenerator, EndpointSignature, build_endpoint_table, generate_class};

/// Fixed banner placed at the top of the generated artifact.
const BANNER: &str = "\
DO NOT EDIT THIS FILE!!
This file is automatically generated by the avropy schema compiler. It
is not intended to be edited directly. If the protocol classes need
updating, rerun the generator against the appropriate schema version.";

/// Generator for the Python protocol definitions artifact.
#[derive(Debug)]
pub struct Generator {
    version: String,
    definitions: Vec<TypeDefinition>,
    endpoints: Vec<EndpointSignature>,
}

impl Generator {
    /// Creates a generator over an in-memory definition set.
    ///
    /// Definitions are sorted by name; the endpoint table is derived
    /// immediately.
    ///
    /// # Errors
    /// Returns `CodegenError` if two definitions share a name.
    pub fn new(
        version: impl Into<String>,
        mut definitions: Vec<TypeDefinition>,
    ) -> Result<Self, CodegenError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.name.clone()) {
                return Err(ParseError::duplicate("type", &def.name).into());
            }
        }
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        let endpoints = build_endpoint_table(&definitions);
        Ok(Self {
            version: version.into(),
            definitions,
            endpoints,
        })
    }

    /// Creates a generator from a directory of `.avsc` files.
    ///
    /// # Errors
    /// Returns `CodegenError` if the directory cannot be read or any
    /// definition fails to parse.
    pub fn from_dir(version: impl Into<String>, schema_dir: &Path) -> Result<Self, CodegenError> {
        let pattern = schema_dir.join("*.avsc");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| CodegenError::generation("schema directory path is not valid UTF-8"))?;
        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|error| CodegenError::generation(format!("invalid glob pattern: {error}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| CodegenError::Io(error.into_error()))?;
        paths.sort();

        let mut definitions = Vec::with_capacity(paths.len());
        for path in &paths {
            tracing::debug!(path = %path.display(), "parsing schema definition");
            definitions.push(parse_definition_file(path)?);
        }
        Self::new(version, definitions)
    }

    /// Returns the sorted definitions.
    #[must_use]
    pub fn definitions(&self) -> &[TypeDefinition] {
        &self.definitions
    }

    /// Returns the derived endpoint table, sorted by URL.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointSignature] {
        &self.endpoints
    }

    /// Renders the full generated artifact.
    ///
    /// # Errors
    /// Returns `CodegenError` if emission fails for any definition; no
    /// partial per-type recovery is attempted.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();
        self.push_header(&mut output);
        for def in &self.definitions {
            tracing::debug!(name = %def.name, "generating class");
            output.push_str("\n\n");
            output.push_str(&generate_class(def)?);
        }
        output.push('\n');
        output.push_str(&EndpointGenerator::new(&self.endpoints).generate());
        Ok(output)
    }

    /// Renders the artifact and publishes it atomically at `path`.
    ///
    /// The artifact is staged in a temporary file in the destination
    /// directory and renamed into place only on success, so a failed run
    /// never leaves partial output visible.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or publication fails.
    pub fn write_to(&self, path: &Path) -> Result<(), CodegenError> {
        let artifact = self.generate()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(artifact.as_bytes())?;
        staged
            .persist(path)
            .map_err(|error| CodegenError::Io(error.error))?;
        tracing::info!(
            path = %path.display(),
            types = self.definitions.len(),
            endpoints = self.endpoints.len(),
            "wrote generated protocol definitions"
        );
        Ok(())
    }

    /// Emits the banner, protocol imports, and version constant.
    fn push_header(&self, output: &mut String) {
        output.push_str("\"\"\"\n");
        output.push_str(BANNER);
        output.push_str("\n\"\"\"\n");
        output.push_str("from protocol import ProtocolElement\n");
        output.push_str("from protocol import SearchRequest\n");
        output.push_str("from protocol import SearchResponse\n");
        output.push('\n');
        output.push_str("import avro.schema\n");
        output.push('\n');
        output.push_str(&format!("version = '{}'\n", self.version_string()));
    }

    /// Returns the version with a leading `v` stripped when it prefixes a
    /// dotted version number.
    fn version_string(&self) -> &str {
        let version = self.version.as_str();
        if (version.starts_with('v') || version.starts_with('V')) && version.contains('.') {
            &version[1..]
        } else {
            version
        }
    }
}
