#![allow(clippy::doc_markdown)] // README uses "OpenAPI" proper noun throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod aggregate;
mod assembler;
mod builder;
mod config;
mod descriptor;
mod discover;
mod error;
pub mod processors;
mod render;
mod schema;
mod settings;

/// Default `x-generator` signature stamped into every document.
pub const GENERATOR_SIGNATURE: &str = concat!("specforge v", env!("CARGO_PKG_VERSION"));

pub use assembler::DocumentGenerator;
pub use config::{ProcessorConfig, ProjectConfig};
pub use descriptor::{
    Annotation, Annotations, EndpointDescriptor, OwnerDescriptor, ParameterDescriptor,
    ParameterLocation, ResponseDescriptor, TypeRef,
};
pub use discover::{group_by_owner, EndpointProvider, ManifestProvider, OwnerGroup};
pub use error::{Error, Result};
pub use processors::{
    DocumentContext, DocumentProcessor, FnDocumentProcessor, FnOperationProcessor,
    OperationContext, OperationDescription, OperationProcessor, ProcessOutcome,
};
pub use render::{load_template, render, template_from_str, to_json, to_yaml, OutputFormat};
pub use schema::{SchemaRef, SchemaResolver, SchemaStore};
pub use settings::{GeneratorSettings, PostProcess, DEFAULT_TITLE, DEFAULT_VERSION};
pub use specforge_model::{
    Components, Document, HttpMethod, Info, MediaTypes, Operation, PathItem, SchemaType,
    SecurityRequirement, Tag, UnknownMethod, Value,
};

/// Internal building blocks for advanced use and testing.
///
/// **Not covered by semver guarantees.** These re-exports are `#[doc(hidden)]`
/// and may change in any release, including patch versions. They exist for
/// integration testing and advanced use cases only.
#[doc(hidden)]
pub mod internal {
    pub use crate::aggregate::aggregate_media_types;
    pub use crate::builder::{
        base_operation_id, build_candidate, collapse_separators, disambiguate, normalize_route,
        Candidate,
    };
}
