//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] avropy_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field's union descriptor is not a supported shape.
    #[error("unsupported union shape for field '{field}' in type '{type_name}': {detail}")]
    UnsupportedUnion {
        /// Type containing the field.
        type_name: String,
        /// Field name.
        field: String,
        /// What made the shape unsupported.
        detail: String,
    },

    /// A search response type does not have the paginated two-field shape.
    #[error(
        "search response '{type_name}' must have exactly the fields 'next_page_token' and one value list, found [{fields}]"
    )]
    ResponseShape {
        /// Type name.
        type_name: String,
        /// The field names actually present.
        fields: String,
    },

    /// An out-of-core collaborator failed; surfaced unchanged.
    #[error("external tool error: {0}")]
    ExternalTool(Box<dyn std::error::Error + Send + Sync>),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unsupported union error.
    pub fn unsupported_union(
        type_name: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::UnsupportedUnion {
            type_name: type_name.into(),
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Wraps a collaborator failure.
    pub fn external(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::ExternalTool(error.into())
    }
}
