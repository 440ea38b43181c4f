//! Document assembly.
//!
//! One run goes through:
//!
//! 1. **Init**: template copy or fresh document, generator signature.
//! 2. **Discover**: ask the provider for endpoints, apply the group filter.
//! 3. **Group**: partition by owner, keeping discovery order.
//! 4. **Per owner group**: build drafts, run the operation pipeline on each,
//!    place the survivors.
//! 5. **Aggregate**: hoist shared media types to the document defaults.
//! 6. **Document pipeline**: document processors, in registration order.
//! 7. **Finalize**: post-process hook.
//!
//! The run is all-or-nothing: any error discards the partial document.

use std::collections::HashSet;
use std::sync::Arc;

use specforge_model::{Document, HttpMethod, Operation};

use crate::aggregate::aggregate_media_types;
use crate::builder::{build_candidate, collapse_separators, disambiguate, Candidate};
use crate::descriptor::{EndpointDescriptor, OwnerDescriptor};
use crate::discover::{group_by_owner, EndpointProvider, OwnerGroup};
use crate::error::{self, Error};
use crate::processors::{
    run_document_pipeline, run_operation_pipeline, DocumentContext, OperationContext,
    OperationDescription, OperationProcessor, ProcessOutcome,
};
use crate::schema::{SchemaResolver, SchemaStore};
use crate::settings::GeneratorSettings;

/// Assembles documents from discovered endpoints.
///
/// A generator can run any number of times; every run starts from a fresh
/// document and shares nothing with earlier runs.
///
/// # Example
///
/// ```ignore
/// let provider = ManifestProvider::from_path(Path::new("endpoints.yaml"))?;
/// let generator = DocumentGenerator::new(GeneratorSettings::new().title("Pets"));
/// let document = generator.generate(&provider)?;
/// ```
#[derive(Debug, Default)]
pub struct DocumentGenerator {
    settings: GeneratorSettings,
}

impl DocumentGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Discover endpoints from `provider` and assemble the document.
    ///
    /// # Errors
    ///
    /// Returns discovery failures, [`Error::OperationConflict`] for
    /// duplicate verb + path pairs, and any schema-resolver or processor
    /// error.
    pub fn generate(&self, provider: &dyn EndpointProvider) -> error::Result<Document> {
        let endpoints = provider.discover()?;
        self.generate_from(endpoints)
    }

    /// Assemble the document from already-discovered endpoints using the
    /// default [`SchemaStore`].
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate), minus discovery.
    pub fn generate_from(&self, endpoints: Vec<EndpointDescriptor>) -> error::Result<Document> {
        let mut resolver = SchemaStore::new();
        self.generate_with(endpoints, &mut resolver)
    }

    /// Assemble the document with a caller-supplied schema resolver.
    ///
    /// The resolver may outlive the run; it must register schemas in the
    /// document it is handed, as [`SchemaStore`] does.
    ///
    /// # Errors
    ///
    /// Same as [`generate_from`](Self::generate_from).
    #[tracing::instrument(skip_all, fields(endpoints = endpoints.len()))]
    pub fn generate_with(
        &self,
        endpoints: Vec<EndpointDescriptor>,
        resolver: &mut dyn SchemaResolver,
    ) -> error::Result<Document> {
        let mut document = self.settings.initial_document();
        let mut log = PlacementLog::seeded(&document);

        let endpoints: Vec<EndpointDescriptor> = endpoints
            .into_iter()
            .filter(|e| {
                let included = self.settings.includes_group(e.group_name.as_deref());
                if !included {
                    tracing::debug!(handler = %e.handler(), "endpoint outside group filter");
                }
                included
            })
            .collect();
        let groups = group_by_owner(endpoints);

        let all_owners: Vec<Arc<OwnerDescriptor>> =
            groups.iter().map(|g| Arc::clone(&g.owner)).collect();
        let mut used_owners: Vec<Arc<OwnerDescriptor>> = Vec::new();
        let operation_pipeline = self.settings.operation_pipeline();

        for group in &groups {
            if group.owner.annotations.is_ignored() {
                tracing::debug!(owner = %group.owner.id, "owner ignored");
                continue;
            }
            let placed = self.process_group(
                group,
                &mut document,
                &mut log,
                resolver,
                &operation_pipeline,
            )?;
            if placed > 0 {
                used_owners.push(Arc::clone(&group.owner));
            }
        }

        aggregate_media_types(&mut document, &log.placed);

        let mut context = DocumentContext {
            document: &mut document,
            all_owners: &all_owners,
            used_owners: &used_owners,
            schema_resolver: resolver,
            settings: &self.settings,
        };
        run_document_pipeline(&self.settings.document_pipeline(), &mut context)?;

        self.settings.run_post_process(&mut document);

        tracing::info!(
            operations = log.placed.len(),
            owners = used_owners.len(),
            paths = document.paths.len(),
            "document assembled"
        );
        Ok(document)
    }

    /// Build, filter and place one owner group. Returns the number of
    /// operations placed.
    fn process_group(
        &self,
        group: &OwnerGroup,
        document: &mut Document,
        log: &mut PlacementLog,
        resolver: &mut dyn SchemaResolver,
        pipeline: &[Arc<dyn OperationProcessor>],
    ) -> error::Result<usize> {
        let mut drafts: Vec<(&EndpointDescriptor, Candidate)> = Vec::new();
        for endpoint in &group.endpoints {
            let candidate = build_candidate(endpoint, |id| {
                log.contains_id(id)
                    || drafts
                        .iter()
                        .any(|(_, draft)| draft.operation.operation_id == id)
            });
            match candidate {
                Some(candidate) => drafts.push((endpoint, candidate)),
                None => tracing::debug!(handler = %endpoint.handler(), "endpoint ignored"),
            }
        }

        let snapshot: Vec<OperationDescription> = drafts
            .iter()
            .map(|(_, draft)| OperationDescription {
                path: draft.path.clone(),
                method: draft.method,
                operation: draft.operation.clone(),
            })
            .collect();

        let mut placed = 0;
        for (endpoint, draft) in drafts {
            let Candidate {
                mut path,
                method,
                mut operation,
            } = draft;

            let mut context = OperationContext {
                document: &mut *document,
                operation: &mut operation,
                path: &mut path,
                method,
                owner: &group.owner,
                endpoint,
                group_operations: &snapshot,
                schema_resolver: &mut *resolver,
                settings: &self.settings,
            };
            if run_operation_pipeline(pipeline, &mut context)? == ProcessOutcome::Reject {
                continue;
            }

            log.place(document, &path, method, operation)?;
            placed += 1;
        }

        Ok(placed)
    }
}

/// Append-only record of what the run has placed.
///
/// Seeded with the identifiers of template operations so generated
/// identifiers never collide with them.
#[derive(Debug, Default)]
struct PlacementLog {
    ids: HashSet<String>,
    placed: Vec<(String, HttpMethod)>,
}

impl PlacementLog {
    fn seeded(document: &Document) -> Self {
        Self {
            ids: document
                .operations()
                .map(|(_, _, op)| op.operation_id.clone())
                .filter(|id| !id.is_empty())
                .collect(),
            placed: Vec::new(),
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Insert `operation` at `path`/`method`.
    ///
    /// A processor-rewritten identifier that collides with a placed one is
    /// disambiguated again.
    fn place(
        &mut self,
        document: &mut Document,
        path: &str,
        method: HttpMethod,
        mut operation: Operation,
    ) -> error::Result<()> {
        let path = collapse_separators(path);

        if !operation.operation_id.is_empty() && self.contains_id(&operation.operation_id) {
            let replacement = disambiguate(&operation.operation_id, |id| self.contains_id(id));
            tracing::warn!(
                operation_id = %operation.operation_id,
                replacement = %replacement,
                "operation id already in use, renamed"
            );
            operation.operation_id = replacement;
        }
        let operation_id = operation.operation_id.clone();

        document
            .paths
            .entry(path.clone())
            .or_default()
            .insert(method, operation)
            .map_err(|_| Error::OperationConflict {
                method,
                path: path.clone(),
            })?;

        tracing::debug!(%method, path = %path, operation_id = %operation_id, "operation placed");
        if !operation_id.is_empty() {
            self.ids.insert(operation_id);
        }
        self.placed.push((path, method));
        Ok(())
    }
}
