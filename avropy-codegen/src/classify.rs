//! Type classification by name pattern.
//!
//! Types named `Search<X>Request` / `Search<X>Response` follow the
//! paginated search convention and receive dedicated superclasses in the
//! generated code; everything else is a plain protocol element or an
//! enum.

use std::sync::LazyLock;

use avropy_schema::TypeDefinition;
use regex::Regex;

static SEARCH_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Search.+Request").expect("valid pattern"));

static SEARCH_RESPONSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Search.+Response").expect("valid pattern"));

static SEARCH_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("Search(.+)Request").expect("valid pattern"));

/// Classification of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Plain record type.
    Record,
    /// Enum type.
    Enum,
    /// Paginated search request type.
    SearchRequest,
    /// Paginated search response type.
    SearchResponse,
}

impl Classification {
    /// Returns the superclass tag attached to the generated class.
    ///
    /// Enums carry no protocol superclass and derive from `object`.
    #[must_use]
    pub const fn superclass(&self) -> &'static str {
        match self {
            Self::Record => "ProtocolElement",
            Self::Enum => "object",
            Self::SearchRequest => "SearchRequest",
            Self::SearchResponse => "SearchResponse",
        }
    }
}

/// Classifies a type definition.
///
/// The enum kind wins over the name patterns; record names are matched
/// against `Search.+Request` and `Search.+Response`.
#[must_use]
pub fn classify(def: &TypeDefinition) -> Classification {
    if def.is_enum() {
        Classification::Enum
    } else if SEARCH_REQUEST.is_match(&def.name) {
        Classification::SearchRequest
    } else if SEARCH_RESPONSE.is_match(&def.name) {
        Classification::SearchResponse
    } else {
        Classification::Record
    }
}

/// Extracts the object name captured by `Search(.+)Request`.
#[must_use]
pub fn search_object_name(request_name: &str) -> Option<String> {
    SEARCH_OBJECT
        .captures(request_name)
        .map(|captures| captures[1].to_string())
}
