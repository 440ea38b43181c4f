//! Schema resolution: type references → reusable schema `$ref`s.
//!
//! The resolver is the only component that writes to the document's schema
//! store. Resolving the same type twice within one run yields the same
//! reference and never duplicates the store entry.

use std::collections::HashMap;
use std::fmt;

use specforge_model::{Document, Value};

use crate::descriptor::TypeRef;
use crate::error::{self, Error};
use crate::processors::helpers::schema_ref;

/// A stable reference to a registered schema (e.g., `#/definitions/User`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef(String);

impl SchemaRef {
    /// The `$ref` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{ $ref: ... }` schema value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        schema_ref(&self.0)
    }
}

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registers schemas for type references in a document.
///
/// Implementations must be idempotent per [`TypeRef::id`] within one run.
pub trait SchemaResolver {
    /// Return the reference for `type_ref`, registering its schema in
    /// `document` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaResolution`] when no schema can be produced.
    fn resolve(&mut self, document: &mut Document, type_ref: &TypeRef) -> error::Result<SchemaRef>;
}

/// Default resolver backed by the document's own schema store.
///
/// Schemas are registered under [`TypeRef::display_name`]. When that name is
/// already taken by a different type, a numeric suffix is appended
/// (`User`, `User2`, `User3`, …).
///
/// A store can be reused across runs: a cached type whose schema is missing
/// from the document being built is registered again.
#[derive(Debug, Default)]
pub struct SchemaStore {
    /// Type id → registered schema name.
    registered: HashMap<String, String>,
}

impl SchemaStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of types registered during this run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no type has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    fn reference(document: &Document, name: &str) -> SchemaRef {
        SchemaRef(format!("{}{name}", document.schema_type.schema_ref_prefix()))
    }
}

impl SchemaResolver for SchemaStore {
    fn resolve(&mut self, document: &mut Document, type_ref: &TypeRef) -> error::Result<SchemaRef> {
        if let Some(name) = self.registered.get(&type_ref.id) {
            if document.schemas().contains_key(name) {
                return Ok(Self::reference(document, name));
            }
        }

        if type_ref.schema.is_null() {
            return Err(Error::SchemaResolution {
                type_id: type_ref.id.clone(),
                message: "no schema was supplied for this type".to_string(),
            });
        }

        let base = type_ref.display_name();
        let schemas = document.schemas_mut();
        let mut name = base.to_string();
        let mut number = 2;
        while schemas.contains_key(&name) {
            name = format!("{base}{number}");
            number += 1;
        }

        schemas.insert(name.clone(), type_ref.schema.clone());
        tracing::debug!(type_id = %type_ref.id, schema = %name, "registered schema");

        let reference = Self::reference(document, &name);
        self.registered.insert(type_ref.id.clone(), name);
        Ok(reference)
    }
}
