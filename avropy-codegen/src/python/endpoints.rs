//! Endpoint table derivation and emission.
//!
//! Pairs classified search request/response types and renders the
//! `postMethods` literal mapping each search URL to its type pair.

use avropy_schema::TypeDefinition;

use crate::classify::{Classification, classify, search_object_name};

/// One derived endpoint: URL plus its request/response type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSignature {
    /// Endpoint path, `/<object>/search`.
    pub url: String,
    /// Search request type name.
    pub request: String,
    /// Search response type name.
    pub response: String,
}

/// Builds the endpoint table from the full definition set.
///
/// Request and response names are each sorted by full type name before
/// the positional pairing; the pairing relies on the schema convention
/// that every `Search<X>Request` has a matching `Search<X>Response`, so
/// the sorted lists align. The result is sorted by URL.
#[must_use]
pub fn build_endpoint_table(definitions: &[TypeDefinition]) -> Vec<EndpointSignature> {
    let mut requests: Vec<&str> = Vec::new();
    let mut responses: Vec<&str> = Vec::new();
    for def in definitions {
        match classify(def) {
            Classification::SearchRequest => requests.push(&def.name),
            Classification::SearchResponse => responses.push(&def.name),
            _ => {}
        }
    }
    requests.sort_unstable();
    responses.sort_unstable();

    let mut table: Vec<EndpointSignature> = requests
        .iter()
        .zip(&responses)
        .filter_map(|(request, response)| {
            search_object_name(request).map(|object| EndpointSignature {
                url: format!("/{}/search", object.to_lowercase()),
                request: (*request).to_string(),
                response: (*response).to_string(),
            })
        })
        .collect();
    table.sort_by(|a, b| {
        a.url
            .cmp(&b.url)
            .then_with(|| a.request.cmp(&b.request))
            .then_with(|| a.response.cmp(&b.response))
    });
    table
}

/// Generator for the `postMethods` literal.
pub struct EndpointGenerator<'a> {
    endpoints: &'a [EndpointSignature],
}

impl<'a> EndpointGenerator<'a> {
    /// Creates a new endpoint table generator.
    #[must_use]
    pub fn new(endpoints: &'a [EndpointSignature]) -> Self {
        Self { endpoints }
    }

    /// Generates the table literal.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        if self.endpoints.is_empty() {
            output.push_str("postMethods = []\n");
            return output;
        }

        output.push_str("postMethods = \\\n");
        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let open = if index == 0 { "    [(" } else { "     (" };
            output.push_str(&format!("{open}'{}',\n", endpoint.url));
            output.push_str(&format!("      {},\n", endpoint.request));
            output.push_str(&format!("      {})", endpoint.response));
            if index == self.endpoints.len() - 1 {
                output.push_str("]\n");
            } else {
                output.push_str(",\n");
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avropy_schema::parse_definition;

    fn record(name: &str) -> TypeDefinition {
        let source = format!(r#"{{"type": "record", "name": "{name}", "fields": []}}"#);
        parse_definition(&source).expect("Failed to parse")
    }

    #[test]
    fn test_build_endpoint_table_pairs_and_sorts() {
        let definitions = vec![
            record("SearchVariantsResponse"),
            record("Variant"),
            record("SearchCallSetsRequest"),
            record("SearchVariantsRequest"),
            record("SearchCallSetsResponse"),
        ];
        let table = build_endpoint_table(&definitions);

        assert_eq!(
            table,
            vec![
                EndpointSignature {
                    url: "/callsets/search".to_string(),
                    request: "SearchCallSetsRequest".to_string(),
                    response: "SearchCallSetsResponse".to_string(),
                },
                EndpointSignature {
                    url: "/variants/search".to_string(),
                    request: "SearchVariantsRequest".to_string(),
                    response: "SearchVariantsResponse".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_build_endpoint_table_empty() {
        let definitions = vec![record("Variant")];
        assert!(build_endpoint_table(&definitions).is_empty());
    }

    #[test]
    fn test_generate_table_literal() {
        let endpoints = vec![
            EndpointSignature {
                url: "/callsets/search".to_string(),
                request: "SearchCallSetsRequest".to_string(),
                response: "SearchCallSetsResponse".to_string(),
            },
            EndpointSignature {
                url: "/variants/search".to_string(),
                request: "SearchVariantsRequest".to_string(),
                response: "SearchVariantsResponse".to_string(),
            },
        ];
        let output = EndpointGenerator::new(&endpoints).generate();

        let expected = "postMethods = \\\n\
                        \x20   [('/callsets/search',\n\
                        \x20     SearchCallSetsRequest,\n\
                        \x20     SearchCallSetsResponse),\n\
                        \x20    ('/variants/search',\n\
                        \x20     SearchVariantsRequest,\n\
                        \x20     SearchVariantsResponse)]\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_empty_table() {
        let output = EndpointGenerator::new(&[]).generate();
        assert_eq!(output, "postMethods = []\n");
    }
}
