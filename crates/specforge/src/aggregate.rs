//! Cross-operation media-type aggregation.
//!
//! After placement, the media types every placed operation agrees on are
//! hoisted to the document defaults, and operations whose own list adds
//! nothing beyond those defaults fall back to [`MediaTypes::Inherited`].

use specforge_model::{Document, HttpMethod, MediaTypes, Operation};

/// Hoist shared consumes/produces of the operations at `placed` into the
/// document defaults.
///
/// Operations outside `placed` (e.g., from a template) are left untouched.
/// Does nothing when `placed` is empty.
pub fn aggregate_media_types(document: &mut Document, placed: &[(String, HttpMethod)]) {
    if placed.is_empty() {
        return;
    }

    let consumes = collect(document, placed, |op| &op.consumes, &document.consumes);
    let produces = collect(document, placed, |op| &op.produces, &document.produces);

    let default_consumes = intersection(&consumes);
    let default_produces = intersection(&produces);

    for (index, (path, method)) in placed.iter().enumerate() {
        let Some(operation) = document
            .paths
            .get_mut(path)
            .and_then(|item| item.get_mut(*method))
        else {
            continue;
        };
        operation.consumes = relative_to(&consumes[index], &default_consumes);
        operation.produces = relative_to(&produces[index], &default_produces);
    }

    tracing::debug!(
        consumes = ?default_consumes,
        produces = ?default_produces,
        "aggregated document media types"
    );
    document.consumes = default_consumes;
    document.produces = default_produces;
}

/// Effective list of every placed operation, in `placed` order.
fn collect(
    document: &Document,
    placed: &[(String, HttpMethod)],
    select: impl Fn(&Operation) -> &MediaTypes,
    document_default: &[String],
) -> Vec<Vec<String>> {
    placed
        .iter()
        .map(|(path, method)| {
            document
                .operation(path, *method)
                .map(|op| select(op).resolve(document_default).to_vec())
                .unwrap_or_default()
        })
        .collect()
}

/// Types present in every set, in the first set's order.
fn intersection(sets: &[Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };
    let mut shared: Vec<String> = Vec::new();
    for media_type in first {
        if rest.iter().all(|set| set.contains(media_type)) && !shared.contains(media_type) {
            shared.push(media_type.clone());
        }
    }
    shared
}

fn relative_to(own: &[String], document_default: &[String]) -> MediaTypes {
    if own.iter().all(|t| document_default.contains(t)) {
        MediaTypes::Inherited
    } else {
        MediaTypes::explicit(own.iter().cloned())
    }
}
