//! Collaborator seams for schema acquisition.
//!
//! The steps that produce the schema directory (network fetch, archive
//! extraction, external IDL compilation) live outside the core. They
//! plug in through [`SchemaSource`], receive an explicit staging
//! directory instead of mutating process-wide state, and surface their
//! failures unchanged as [`CodegenError::ExternalTool`].

use std::path::{Path, PathBuf};

use crate::error::CodegenError;
use crate::generator::Generator;

/// Provider of a directory of `.avsc` schema definitions.
pub trait SchemaSource {
    /// Makes the schema definitions available, using `staging` for any
    /// intermediate files, and returns the directory containing them.
    ///
    /// # Errors
    /// Returns `CodegenError::ExternalTool` when an out-of-core step
    /// fails; the error is surfaced to the caller unchanged.
    fn provide(&self, staging: &Path) -> Result<PathBuf, CodegenError>;
}

/// Schema source backed by a pre-existing local directory.
///
/// Bypasses any fetch or conversion step; the directory is used as-is.
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    dir: PathBuf,
}

impl LocalDirSource {
    /// Creates a source over the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SchemaSource for LocalDirSource {
    fn provide(&self, _staging: &Path) -> Result<PathBuf, CodegenError> {
        if !self.dir.is_dir() {
            return Err(CodegenError::generation(format!(
                "schema directory '{}' does not exist",
                self.dir.display()
            )));
        }
        Ok(self.dir.clone())
    }
}

/// Scoped staging directory for collaborator intermediates.
///
/// The directory is removed when the guard drops, on success and failure
/// alike.
#[derive(Debug)]
pub struct Staging {
    dir: tempfile::TempDir,
}

impl Staging {
    /// Creates a fresh staging directory.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory cannot be created.
    pub fn new() -> Result<Self, CodegenError> {
        let dir = tempfile::Builder::new().prefix("avropy_").tempdir()?;
        Ok(Self { dir })
    }

    /// Returns the staging directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Runs a full generation: acquire schemas, generate, publish.
///
/// Staging storage is released on every exit path.
///
/// # Errors
/// Returns `CodegenError` if acquisition, parsing, analysis, emission,
/// or publication fails; the output file is untouched on failure.
pub fn run(source: &dyn SchemaSource, version: &str, output: &Path) -> Result<(), CodegenError> {
    let staging = Staging::new()?;
    let schema_dir = source.provide(staging.path())?;
    let generator = Generator::from_dir(version, &schema_dir)?;
    generator.write_to(output)
}
