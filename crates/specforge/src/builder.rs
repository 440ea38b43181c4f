//! Endpoint → draft operation conversion.
//!
//! The builder never touches the document: it turns one descriptor into a
//! draft [`Operation`] with normalized path, verb, media types, deprecation
//! flag and a disambiguated identifier. Everything else (parameters,
//! responses, tags) is filled in by operation processors.

use specforge_model::{HttpMethod, MediaTypes, Operation};

use crate::descriptor::EndpointDescriptor;

/// Suffix stripped from action names when deriving identifiers.
const ASYNC_SUFFIX: &str = "Async";

/// A draft operation plus where it will be placed.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Normalized path.
    pub path: String,
    /// Verb.
    pub method: HttpMethod,
    /// Draft operation.
    pub operation: Operation,
}

/// Build the draft operation for `endpoint`, or `None` when it (or its
/// owner) is ignored.
///
/// `is_taken` reports whether an identifier is already in use; the first
/// free identifier of the disambiguation sequence is chosen.
pub fn build_candidate(
    endpoint: &EndpointDescriptor,
    is_taken: impl Fn(&str) -> bool,
) -> Option<Candidate> {
    if endpoint.is_ignored() {
        return None;
    }

    let path = normalize_route(&endpoint.route);
    let method = endpoint.method.unwrap_or(HttpMethod::Get);

    let base = base_operation_id(endpoint);
    let operation_id = disambiguate(&base, is_taken);

    let produces = MediaTypes::explicit(
        endpoint
            .responses
            .iter()
            .flat_map(|r| r.content_types.iter().cloned()),
    );

    let operation = Operation {
        operation_id,
        consumes: MediaTypes::explicit(endpoint.consumes.iter().cloned()),
        produces,
        deprecated: endpoint.deprecated,
        ..Operation::default()
    };

    Some(Candidate {
        path,
        method,
        operation,
    })
}

/// Preferred identifier: a non-empty `OperationId` override, else
/// `<Owner>_<Action>` with a trailing `Async` stripped from the action.
#[must_use]
pub fn base_operation_id(endpoint: &EndpointDescriptor) -> String {
    if let Some(id) = endpoint.annotations.operation_id() {
        return id.to_string();
    }
    let action = endpoint
        .action
        .strip_suffix(ASYNC_SUFFIX)
        .filter(|a| !a.is_empty())
        .unwrap_or(&endpoint.action);
    format!("{}_{action}", endpoint.owner.name)
}

/// First identifier of `base`, `base_2`, `base3`, `base4`, … not taken.
pub fn disambiguate(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut attempt: usize = 1;
    loop {
        let candidate = match attempt {
            1 => base.to_string(),
            2 => format!("{base}_2"),
            n => format!("{base}{n}"),
        };
        if !is_taken(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}

/// Ensure the route starts with `/` and has no doubled separators.
#[must_use]
pub fn normalize_route(route: &str) -> String {
    let route = route.trim();
    if route.starts_with('/') {
        collapse_separators(route)
    } else {
        collapse_separators(&format!("/{route}"))
    }
}

/// Collapse runs of `/` into a single separator.
#[must_use]
pub fn collapse_separators(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        result.push(c);
    }
    result
}
