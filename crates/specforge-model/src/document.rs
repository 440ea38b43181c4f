//! The document root and its metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::operation::Operation;
use crate::path::{HttpMethod, PathItem};

/// A security requirement: scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Which description format the document targets.
///
/// Decides the version key that gets stamped (`swagger` vs `openapi`) and
/// where schemas and security schemes live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    /// Swagger 2.0: `definitions`, `securityDefinitions`.
    #[default]
    Swagger2,
    /// OpenAPI 3.0: `components.schemas`, `components.securitySchemes`.
    OpenApi3,
}

impl SchemaType {
    /// Version string stamped into the document.
    #[must_use]
    pub const fn version(self) -> &'static str {
        match self {
            Self::Swagger2 => "2.0",
            Self::OpenApi3 => "3.0.0",
        }
    }

    /// Prefix for schema `$ref`s (e.g., `#/definitions/`).
    #[must_use]
    pub const fn schema_ref_prefix(self) -> &'static str {
        match self {
            Self::Swagger2 => "#/definitions/",
            Self::OpenApi3 => "#/components/schemas/",
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,

    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// API version.
    #[serde(default)]
    pub version: String,

    /// Contact, license, `x-*` and other metadata kept verbatim.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A document-level tag declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name, as referenced by operations.
    pub name: String,

    /// Tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI 3 `components` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Schema store.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,

    /// Security schemes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, Value>,

    /// Other component kinds kept verbatim.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Components {
    /// Whether nothing would be serialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.security_schemes.is_empty() && self.extensions.is_empty()
    }
}

/// Root of a generated API description.
///
/// Created once per generation run and returned as the final artifact. The
/// path table keeps insertion order, so output is reproducible for a given
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Swagger 2.0 version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    /// OpenAPI 3.x version marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    /// Generator signature.
    #[serde(rename = "x-generator", default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Title, description, version.
    #[serde(default)]
    pub info: Info,

    /// Swagger 2.0 host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Swagger 2.0 base path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Swagger 2.0 transfer schemes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    /// Document-wide default request media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    /// Document-wide default response media types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    /// Normalized path → operations, in insertion order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Swagger 2.0 schema store.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Value>,

    /// Swagger 2.0 security schemes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, Value>,

    /// OpenAPI 3 components.
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,

    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,

    /// Tag declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    /// `x-*` extension data.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,

    /// Target format. Not serialized; see [`Document::detect_schema_type`].
    #[serde(skip)]
    pub schema_type: SchemaType,
}

impl Document {
    /// Create an empty document for `schema_type` with its version key stamped.
    #[must_use]
    pub fn new(schema_type: SchemaType) -> Self {
        let mut doc = Self::default();
        doc.stamp_schema_type(schema_type);
        doc
    }

    /// Set the target format and its version key.
    ///
    /// An existing version string of the same format (e.g., `openapi: 3.0.3`
    /// from a template) is kept; the other format's key is cleared.
    pub fn stamp_schema_type(&mut self, schema_type: SchemaType) {
        self.schema_type = schema_type;
        match schema_type {
            SchemaType::Swagger2 => {
                self.openapi = None;
                self.swagger
                    .get_or_insert_with(|| schema_type.version().to_string());
            }
            SchemaType::OpenApi3 => {
                self.swagger = None;
                self.openapi
                    .get_or_insert_with(|| schema_type.version().to_string());
            }
        }
    }

    /// Infer [`SchemaType`] from the version keys after deserialization.
    pub fn detect_schema_type(&mut self) {
        self.schema_type = if self.openapi.is_some() {
            SchemaType::OpenApi3
        } else {
            SchemaType::Swagger2
        };
    }

    /// Schema store for the current format.
    #[must_use]
    pub fn schemas(&self) -> &IndexMap<String, Value> {
        match self.schema_type {
            SchemaType::Swagger2 => &self.definitions,
            SchemaType::OpenApi3 => &self.components.schemas,
        }
    }

    /// Mutable schema store for the current format.
    pub fn schemas_mut(&mut self) -> &mut IndexMap<String, Value> {
        match self.schema_type {
            SchemaType::Swagger2 => &mut self.definitions,
            SchemaType::OpenApi3 => &mut self.components.schemas,
        }
    }

    /// Mutable security scheme table for the current format.
    pub fn security_schemes_mut(&mut self) -> &mut IndexMap<String, Value> {
        match self.schema_type {
            SchemaType::Swagger2 => &mut self.security_definitions,
            SchemaType::OpenApi3 => &mut self.components.security_schemes,
        }
    }

    /// All operations as `(path, method, operation)`, in insertion order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    /// Mutable operations in insertion order.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        self.paths
            .values_mut()
            .flat_map(|item| item.iter_mut().map(|(_, op)| op))
    }

    /// Look up an operation by path and method.
    #[must_use]
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path)?.get(method)
    }

    /// Look up an operation by identifier.
    #[must_use]
    pub fn find_operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations()
            .map(|(_, _, op)| op)
            .find(|op| op.operation_id == operation_id)
    }
}
