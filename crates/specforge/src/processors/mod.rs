//! Operation and document processor pipelines.
//!
//! Processors are the extension points of a generation run:
//!
//! - [`OperationProcessor`]s run once per candidate operation and may mutate
//!   it, mutate the document, or reject the candidate outright. The first
//!   rejection short-circuits the rest of that candidate's pipeline.
//! - [`DocumentProcessor`]s run once, after every surviving operation has
//!   been placed, and always run to completion.
//!
//! Built-in processors are grouped into logical modules:
//! - [`parameters`]: request parameters and bodies
//! - [`responses`]: response objects
//! - [`tags`]: operation tags and document tag declarations
//! - [`summary`]: summary/description annotations
//! - [`api_version`]: API-version filtering
//! - [`security`]: anonymous-access overrides and the bearer scheme

mod api_version;
pub(crate) mod helpers;
mod parameters;
mod responses;
mod security;
mod summary;
mod tags;

use std::fmt;
use std::sync::Arc;

use specforge_model::{Document, HttpMethod, Operation};

use crate::descriptor::{EndpointDescriptor, OwnerDescriptor, TypeRef};
use crate::error;
use crate::schema::{SchemaRef, SchemaResolver};
use crate::settings::GeneratorSettings;

pub use api_version::ApiVersionProcessor;
pub use parameters::OperationParameterProcessor;
pub use responses::OperationResponseProcessor;
pub use security::{AnonymousAccessProcessor, SecuritySchemeAppender, BEARER_SCHEME_NAME};
pub use summary::OperationSummaryProcessor;
pub use tags::{DocumentTagsProcessor, OperationTagsProcessor};

/// Verdict of an operation processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Keep the candidate and continue the pipeline.
    Accept,
    /// Drop the candidate; later processors do not run.
    Reject,
}

/// A draft operation as seen by other candidates of the same owner group.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescription {
    /// Normalized path.
    pub path: String,
    /// Verb.
    pub method: HttpMethod,
    /// Draft operation as built, before any processor ran.
    pub operation: Operation,
}

/// Everything an operation processor may look at or change.
pub struct OperationContext<'a> {
    /// Document assembled so far.
    pub document: &'a mut Document,
    /// Draft operation under evaluation.
    pub operation: &'a mut Operation,
    /// Normalized path the operation will be placed under.
    pub path: &'a mut String,
    /// Verb the operation will be placed under.
    pub method: HttpMethod,
    /// Owning handler group.
    pub owner: &'a OwnerDescriptor,
    /// Originating endpoint.
    pub endpoint: &'a EndpointDescriptor,
    /// All draft operations built for the current owner group.
    pub group_operations: &'a [OperationDescription],
    /// Schema resolver for the run.
    pub schema_resolver: &'a mut dyn SchemaResolver,
    /// Generator settings.
    pub settings: &'a GeneratorSettings,
}

impl OperationContext<'_> {
    /// Handler identity of the originating endpoint.
    #[must_use]
    pub fn handler(&self) -> String {
        self.endpoint.handler()
    }

    /// Resolve `type_ref` to a registered schema reference.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures.
    pub fn resolve_schema(&mut self, type_ref: &TypeRef) -> error::Result<SchemaRef> {
        self.schema_resolver.resolve(self.document, type_ref)
    }

    /// Schema value for `type_ref`: scalars inline, everything else as `$ref`.
    ///
    /// # Errors
    ///
    /// Propagates resolver failures.
    pub fn schema_for(&mut self, type_ref: &TypeRef) -> error::Result<specforge_model::Value> {
        if type_ref.is_primitive() {
            return Ok(type_ref.schema.clone());
        }
        Ok(self.resolve_schema(type_ref)?.to_value())
    }
}

/// Everything a document processor may look at or change.
pub struct DocumentContext<'a> {
    /// The document with every surviving operation placed.
    pub document: &'a mut Document,
    /// Every owner that had at least one discovered endpoint.
    pub all_owners: &'a [Arc<OwnerDescriptor>],
    /// Owners that contributed at least one surviving operation.
    pub used_owners: &'a [Arc<OwnerDescriptor>],
    /// Schema resolver for the run.
    pub schema_resolver: &'a mut dyn SchemaResolver,
    /// Generator settings.
    pub settings: &'a GeneratorSettings,
}

/// Per-operation extension step.
pub trait OperationProcessor: fmt::Debug + Send + Sync {
    /// Inspect or change the candidate, or reject it.
    ///
    /// Document mutations made before returning [`ProcessOutcome::Reject`]
    /// are not rolled back.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole generation run.
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Per-document extension step.
pub trait DocumentProcessor: fmt::Debug + Send + Sync {
    /// Change the document in place.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole generation run.
    fn process(&self, context: &mut DocumentContext<'_>) -> error::Result<()>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Operation processor backed by a closure.
pub struct FnOperationProcessor<F> {
    name: String,
    f: F,
}

impl<F> FnOperationProcessor<F>
where
    F: Fn(&mut OperationContext<'_>) -> error::Result<ProcessOutcome> + Send + Sync,
{
    /// Wrap `f` under `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnOperationProcessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperationProcessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> OperationProcessor for FnOperationProcessor<F>
where
    F: Fn(&mut OperationContext<'_>) -> error::Result<ProcessOutcome> + Send + Sync,
{
    fn process(&self, context: &mut OperationContext<'_>) -> error::Result<ProcessOutcome> {
        (self.f)(context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Document processor backed by a closure.
pub struct FnDocumentProcessor<F> {
    name: String,
    f: F,
}

impl<F> FnDocumentProcessor<F>
where
    F: Fn(&mut DocumentContext<'_>) -> error::Result<()> + Send + Sync,
{
    /// Wrap `f` under `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnDocumentProcessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDocumentProcessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> DocumentProcessor for FnDocumentProcessor<F>
where
    F: Fn(&mut DocumentContext<'_>) -> error::Result<()> + Send + Sync,
{
    fn process(&self, context: &mut DocumentContext<'_>) -> error::Result<()> {
        (self.f)(context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Run the operation pipeline for one candidate.
///
/// Order: global processors, then the owner's, then the endpoint's. Stops at
/// the first rejection.
///
/// # Errors
///
/// Propagates the first processor error.
pub(crate) fn run_operation_pipeline(
    global: &[Arc<dyn OperationProcessor>],
    context: &mut OperationContext<'_>,
) -> error::Result<ProcessOutcome> {
    let owner = context.owner;
    let endpoint = context.endpoint;

    for processor in global
        .iter()
        .chain(&owner.processors)
        .chain(&endpoint.processors)
    {
        if processor.process(context)? == ProcessOutcome::Reject {
            tracing::debug!(
                processor = processor.name(),
                handler = %context.handler(),
                "operation rejected"
            );
            return Ok(ProcessOutcome::Reject);
        }
    }

    Ok(ProcessOutcome::Accept)
}

/// Run every document processor in registration order.
///
/// # Errors
///
/// Propagates the first processor error.
pub(crate) fn run_document_pipeline(
    processors: &[Arc<dyn DocumentProcessor>],
    context: &mut DocumentContext<'_>,
) -> error::Result<()> {
    for processor in processors {
        tracing::debug!(processor = processor.name(), "running document processor");
        processor.process(context)?;
    }
    Ok(())
}
