//! Shared document model for the specforge ecosystem.
//!
//! This crate holds the serde-serializable types that make up a generated
//! API description: the [`Document`] root, its insertion-ordered path table
//! of [`PathItem`]s, and the per-verb [`Operation`]s. Media-type inheritance
//! is expressed explicitly through [`MediaTypes`] instead of nullable lists.
//!
//! Both the assembly engine and any downstream tooling depend on these
//! types. You should not need to depend on this crate directly; use
//! `specforge` instead, which re-exports everything here.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod document;
mod operation;
mod path;

pub use document::{Components, Document, Info, SchemaType, SecurityRequirement, Tag};
pub use operation::{MediaTypes, Operation};
pub use path::{HttpMethod, PathItem, UnknownMethod};

/// Opaque JSON-schema-compatible value used for schemas, parameters,
/// responses and extension data.
pub use serde_yaml_ng::Value;
